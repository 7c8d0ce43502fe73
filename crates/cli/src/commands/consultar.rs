use serde_json::{json, Map, Value};

use parecer_agent::ToolRegistry;
use parecer_core::AppConfig;
use parecer_store::build_backends;

use crate::commands::{build_runtime, CommandResult};

pub fn run(
    config: &AppConfig,
    cnpj: Option<String>,
    api_id: Option<String>,
    tipo_servico: Option<String>,
) -> CommandResult {
    if cnpj.is_none() && api_id.is_none() {
        return CommandResult::failure(
            "consultar",
            "invalid_input",
            "informe --cnpj e/ou --api-id",
            2,
        );
    }
    if tipo_servico.is_some() && cnpj.is_none() {
        return CommandResult::failure(
            "consultar",
            "invalid_input",
            "--tipo-servico requer --cnpj",
            2,
        );
    }

    let backends = match build_backends(config) {
        Ok(backends) => backends,
        Err(error) => {
            return CommandResult::failure("consultar", "backend", error.to_string(), 4);
        }
    };
    let runtime = match build_runtime("consultar") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let registry = ToolRegistry::with_backends(&backends);
    let result = runtime.block_on(async {
        let mut data = Map::new();

        if let Some(cnpj) = cnpj {
            let contract =
                registry.execute("integrar_onetrust", json!({"cnpj": &cnpj})).await?;
            let caveats =
                registry.execute("carregar_ressalvas", json!({"cnpj": &cnpj})).await?;
            data.insert("fornecedor".to_string(), contract);
            data.insert("ressalvas_anteriores".to_string(), caveats);

            if let Some(tipo_servico) = tipo_servico {
                let history = registry
                    .execute(
                        "carregar_insumos",
                        json!({"cnpj": &cnpj, "tipo_servico": tipo_servico}),
                    )
                    .await?;
                data.insert("historico".to_string(), history);
            }
        }

        if let Some(api_id) = api_id {
            let service =
                registry.execute("consultar_cmdb", json!({"api_id": api_id})).await?;
            data.insert("servico".to_string(), service);
        }

        Ok::<Value, anyhow::Error>(Value::Object(data))
    });

    match result {
        Ok(data) => CommandResult::success("consultar", data),
        Err(error) => CommandResult::failure("consultar", "backend", error.to_string(), 4),
    }
}
