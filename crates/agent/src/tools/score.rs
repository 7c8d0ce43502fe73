use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use parecer_core::{RequestAttributeBundle, ScoringEngine};

use super::Tool;

/// Deterministic opinion suggestion (`sugerir_parecer`).
pub struct ScoreTool<E> {
    engine: E,
}

impl<E> ScoreTool<E>
where
    E: ScoringEngine,
{
    pub fn new(engine: E) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl<E> Tool for ScoreTool<E>
where
    E: ScoringEngine + Send + Sync,
{
    fn name(&self) -> &'static str {
        "sugerir_parecer"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let bundle: RequestAttributeBundle = serde_json::from_value(input)?;
        let scored = self.engine.score(&bundle);
        info!(
            parecer = scored.opinion_type.label(),
            score = scored.confidence,
            "opinion suggested"
        );
        Ok(serde_json::to_value(scored)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use parecer_core::DeterministicScoringEngine;

    use crate::tools::Tool;

    use super::ScoreTool;

    #[tokio::test]
    async fn strong_renewal_bundle_scores_favorable() {
        let tool = ScoreTool::new(DeterministicScoringEngine::default());

        let result = tool
            .execute(json!({
                "tipo_requisicao": "Renovação",
                "integracoes_disponiveis": ["REST", "WEBHOOK", "MENSAGERIA"],
                "fluxo_dados": "BIDIRECIONAL",
                "direcionador": "Evoluir",
                "parecer_anterior": "Parecer Favorável",
                "armazena_dados_bv": false,
            }))
            .await
            .expect("score");

        assert_eq!(result["parecer_sugerido"], json!("Parecer Favorável"));
        assert_eq!(result["score_confianca"], json!(1.0));
        assert!(result["ressalvas"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sparse_bundle_defaults_to_neutral_inputs() {
        let tool = ScoreTool::new(DeterministicScoringEngine::default());

        let result = tool
            .execute(json!({"tipo_requisicao": "Nova Contratação"}))
            .await
            .expect("score");

        assert_eq!(result["parecer_sugerido"], json!("Parecer Favorável com Ressalvas"));
        assert_eq!(result["score_confianca"], json!(0.5));
    }

    #[tokio::test]
    async fn unknown_request_type_is_rejected() {
        let tool = ScoreTool::new(DeterministicScoringEngine::default());

        let result = tool.execute(json!({"tipo_requisicao": "Aditivo"})).await;
        assert!(result.is_err());
    }
}
