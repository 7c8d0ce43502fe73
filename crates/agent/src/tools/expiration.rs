use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use parecer_core::classify_expiration;

use super::Tool;

/// Input accepts both the field names of the contract-lookup payload
/// and the short forms, so the lookup output can be fed in unchanged.
#[derive(Debug, Default, Deserialize)]
struct ExpirationInput {
    #[serde(default, alias = "data_vencimento_contrato")]
    data_vencimento: Option<String>,
    #[serde(default)]
    dias_ate_vencimento: Option<i64>,
}

/// Expiration-window classifier (`capturar_vencimento`).
pub struct ExpirationTool;

#[async_trait]
impl Tool for ExpirationTool {
    fn name(&self) -> &'static str {
        "capturar_vencimento"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: ExpirationInput = serde_json::from_value(input)?;
        let check = classify_expiration(input.data_vencimento.as_deref(), input.dias_ate_vencimento);
        Ok(serde_json::to_value(check)?)
    }
}
