use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use parecer_core::{finalize_draft, DomainError, OpinionDraft};
use parecer_store::{OpinionSink, SourceError};

use super::Tool;

/// Registration sink (`registrar_parecer`): validates the draft, mints
/// the record, and hands it to the opinion store.
pub struct RegisterTool {
    sink: Arc<dyn OpinionSink>,
}

impl RegisterTool {
    pub fn new(sink: Arc<dyn OpinionSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Tool for RegisterTool {
    fn name(&self) -> &'static str {
        "registrar_parecer"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let draft: OpinionDraft = serde_json::from_value(input)?;

        let opinion = match finalize_draft(draft, Utc::now()) {
            Ok(opinion) => opinion,
            Err(error) => {
                let DomainError::MissingRequiredFields { ref fields } = error else {
                    return Err(error.into());
                };
                return Ok(json!({
                    "sucesso": false,
                    "erro": error.code(),
                    "campos_faltantes": fields,
                    "mensagem": format!(
                        "Não foi possível registrar o parecer. Campos obrigatórios ausentes: {}",
                        fields.join(", ")
                    ),
                }));
            }
        };

        let summary = json!({
            "tipo_parecer": opinion.opinion_type,
            "sigla_servico": opinion.service_code,
            "direcionador": opinion.direction,
            "total_ressalvas": opinion.caveats.len(),
        });

        match self.sink.save(opinion).await {
            Ok(receipt) => {
                info!(parecer_id = %receipt.opinion_id.0, "opinion registered");
                Ok(json!({
                    "sucesso": true,
                    "parecer_id": receipt.opinion_id,
                    "data_registro": receipt.registered_at,
                    "status": receipt.status,
                    "proximo_status": receipt.next_status,
                    "mensagem": "Parecer registrado com sucesso. Encaminhado para revisão do analista.",
                    "dados_parecer": summary,
                }))
            }
            Err(error) => Ok(sink_failure(&error)),
        }
    }
}

fn sink_failure(error: &SourceError) -> Value {
    warn!(%error, "opinion registration failed");
    let (message, action) = match error {
        SourceError::Timeout(_) => (
            "Sistema não respondeu no tempo esperado".to_string(),
            "Tentar novamente ou registrar manualmente",
        ),
        SourceError::Connection(_) => (
            "Falha ao conectar com o sistema de registro".to_string(),
            "Verificar conectividade e tentar novamente",
        ),
        SourceError::Unknown(detail) => {
            (format!("Erro inesperado ao registrar parecer: {detail}"), "Contatar suporte técnico")
        }
    };
    json!({
        "sucesso": false,
        "erro": error.code(),
        "mensagem": message,
        "acao_requerida": action,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use parecer_core::FinalizedOpinion;
    use parecer_store::{
        InMemoryOpinionSink, OpinionSink, RegistrationReceipt, SourceError,
    };

    use crate::tools::Tool;

    use super::RegisterTool;

    struct FailingSink(SourceError);

    #[async_trait::async_trait]
    impl OpinionSink for FailingSink {
        async fn save(
            &self,
            _opinion: FinalizedOpinion,
        ) -> Result<RegistrationReceipt, SourceError> {
            Err(self.0.clone())
        }
    }

    fn complete_payload() -> serde_json::Value {
        json!({
            "cnpj": "12.345.678/0001-90",
            "nome_fornecedor": "Tech Solutions LTDA",
            "api_id": "API-001",
            "sigla_servico": "CRM-API",
            "direcionador": "Evoluir",
            "tipo_requisicao": "Renovação",
            "parecer_sugerido": "Parecer Favorável",
            "justificativa": "Parecer FAVORÁVEL para renovação.",
            "ressalvas": ["SLA deve ser revisado após 6 meses de operação"],
            "score_confianca": 0.95,
        })
    }

    #[tokio::test]
    async fn successful_registration_returns_receipt_and_summary() {
        let sink = Arc::new(InMemoryOpinionSink::default());
        let tool = RegisterTool::new(Arc::clone(&sink) as Arc<dyn OpinionSink>);

        let result = tool.execute(complete_payload()).await.expect("register");

        assert_eq!(result["sucesso"], json!(true));
        assert_eq!(result["status"], json!("REGISTRADO"));
        assert_eq!(result["proximo_status"], json!("AGUARDANDO_REVISAO_ANALISTA"));
        assert_eq!(result["dados_parecer"]["total_ressalvas"], json!(1));
        assert!(result["parecer_id"].as_str().unwrap().starts_with("PAR-"));
        assert_eq!(sink.saved().await.len(), 1);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_and_nothing_is_stored() {
        let sink = Arc::new(InMemoryOpinionSink::default());
        let tool = RegisterTool::new(Arc::clone(&sink) as Arc<dyn OpinionSink>);

        let result = tool
            .execute(json!({"cnpj": "12345678000190", "api_id": "API-001"}))
            .await
            .expect("validation payload");

        assert_eq!(result["sucesso"], json!(false));
        assert_eq!(result["erro"], json!("CAMPOS_OBRIGATORIOS_AUSENTES"));
        assert_eq!(
            result["campos_faltantes"],
            json!(["nome_fornecedor", "tipo_requisicao", "parecer_sugerido", "justificativa"])
        );
        assert!(sink.saved().await.is_empty());
    }

    #[tokio::test]
    async fn sink_timeout_suggests_manual_registration() {
        let tool =
            RegisterTool::new(Arc::new(FailingSink(SourceError::Timeout("registro".into()))));

        let result = tool.execute(complete_payload()).await.expect("register");

        assert_eq!(result["sucesso"], json!(false));
        assert_eq!(result["erro"], json!("TIMEOUT"));
        assert_eq!(
            result["acao_requerida"],
            json!("Tentar novamente ou registrar manualmente")
        );
    }
}
