use serde_json::{json, Value};

use parecer_agent::{EvaluationRequest, FlowError, FlowOutcome, OpinionFlow};
use parecer_core::{AppConfig, DataFlow, DeterministicScoringEngine, RequestType};
use parecer_store::build_backends;

use crate::commands::{build_runtime, CommandResult};

pub struct Args {
    pub cnpj: String,
    pub api_id: String,
    pub tipo: String,
    pub integracoes: Vec<String>,
    pub fluxo: Option<String>,
    pub armazena_dados_bv: bool,
    pub email: Option<String>,
    pub diretoria: Option<String>,
    pub registrar: bool,
}

pub fn run(config: &AppConfig, args: Args) -> CommandResult {
    let request_type: RequestType = match parse_label(&args.tipo) {
        Ok(value) => value,
        Err(_) => {
            return CommandResult::failure(
                "avaliar",
                "invalid_input",
                format!("tipo de requisição inválido: `{}`", args.tipo),
                2,
            );
        }
    };
    let data_flow: Option<DataFlow> = match args.fluxo.as_deref().map(parse_label).transpose() {
        Ok(value) => value,
        Err(_) => {
            return CommandResult::failure(
                "avaliar",
                "invalid_input",
                format!("fluxo de dados inválido: `{}`", args.fluxo.unwrap_or_default()),
                2,
            );
        }
    };

    let backends = match build_backends(config) {
        Ok(backends) => backends,
        Err(error) => {
            return CommandResult::failure("avaliar", "backend", error.to_string(), 4);
        }
    };
    let runtime = match build_runtime("avaliar") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let flow = OpinionFlow::new(backends, DeterministicScoringEngine::default());
    let request = EvaluationRequest {
        cnpj: args.cnpj,
        api_id: args.api_id,
        request_type,
        integrations: args.integracoes,
        data_flow,
        stores_bv_data: args.armazena_dados_bv,
        requester_email: args.email,
        requester_directorate: args.diretoria,
    };

    let result = runtime.block_on(async {
        let outcome = flow.evaluate(&request).await?;

        Ok::<Value, FlowError>(match outcome {
            FlowOutcome::Blocked { expiration } => json!({
                "resultado": "BLOQUEADO",
                "vencimento": expiration,
            }),
            FlowOutcome::Evaluated { expiration, scored, draft } => {
                let registro = if args.registrar {
                    Some(flow.register(draft).await?)
                } else {
                    None
                };
                json!({
                    "resultado": "AVALIADO",
                    "vencimento": expiration,
                    "parecer": scored,
                    "registro": registro,
                })
            }
        })
    });

    match result {
        Ok(data) => CommandResult::success("avaliar", data),
        Err(FlowError::InvalidRequest(error)) => {
            CommandResult::failure("avaliar", "invalid_input", error.to_string(), 2)
        }
        Err(FlowError::ContractNotFound { cnpj }) => CommandResult::failure(
            "avaliar",
            "not_found",
            format!("fornecedor não encontrado no OneTrust: {cnpj}"),
            5,
        ),
        Err(FlowError::Backend(error)) => {
            CommandResult::failure("avaliar", "backend", error.to_string(), 4)
        }
    }
}

fn parse_label<T: serde::de::DeserializeOwned>(label: &str) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::String(label.to_string()))
}
