use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use parecer_core::TaxId;
use parecer_store::{
    CatalogSource, ContractSource, HistorySource, SourceError, HISTORY_SEARCH_LIMIT,
};

use super::Tool;

#[derive(Debug, Deserialize)]
struct CnpjInput {
    cnpj: String,
}

#[derive(Debug, Deserialize)]
struct ServiceInput {
    api_id: String,
}

#[derive(Debug, Deserialize)]
struct HistoryInput {
    cnpj: String,
    tipo_servico: String,
}

/// OneTrust contract context lookup (`integrar_onetrust`).
pub struct ContractLookupTool {
    source: Arc<dyn ContractSource>,
}

impl ContractLookupTool {
    pub fn new(source: Arc<dyn ContractSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for ContractLookupTool {
    fn name(&self) -> &'static str {
        "integrar_onetrust"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: CnpjInput = serde_json::from_value(input)?;
        let tax_id = TaxId::normalize(&input.cnpj);
        info!(cnpj = %tax_id, "integrating with OneTrust");

        let record = match self.source.get(&tax_id).await {
            Ok(record) => record,
            Err(error) => return Ok(contract_backend_failure(&tax_id, &error)),
        };

        let Some(record) = record else {
            return Ok(json!({
                "encontrado": false,
                "cnpj": tax_id.as_str(),
                "mensagem": "Fornecedor não encontrado no OneTrust",
                "acao_requerida": "Cadastrar fornecedor no OneTrust antes de prosseguir",
            }));
        };

        let now = Utc::now();
        Ok(json!({
            "encontrado": true,
            "cnpj": record.tax_id.as_str(),
            "nome_fornecedor": record.supplier_name,
            "tipo_contrato": record.contract_type,
            "data_vencimento_contrato": record.expires_at.map(|date| date.to_rfc3339()),
            "dias_ate_vencimento": record.days_to_expiration(now),
            "dados_contexto": record.context,
            "data_ultimo_update": record.last_updated,
        }))
    }
}

fn contract_backend_failure(tax_id: &TaxId, error: &SourceError) -> Value {
    warn!(cnpj = %tax_id, %error, "OneTrust lookup failed");
    let message = match error {
        SourceError::Timeout(_) => {
            "OneTrust não respondeu no tempo esperado. Tente novamente em alguns minutos."
                .to_string()
        }
        SourceError::Connection(_) => {
            "Falha ao conectar com OneTrust. Verifique conectividade.".to_string()
        }
        SourceError::Unknown(detail) => {
            format!("Erro inesperado ao consultar OneTrust: {detail}")
        }
    };
    json!({
        "encontrado": false,
        "erro": error.code(),
        "cnpj": tax_id.as_str(),
        "mensagem": message,
        "acao_requerida": error.remediation(),
    })
}

/// CMDB service lookup (`consultar_cmdb`).
pub struct CatalogLookupTool {
    source: Arc<dyn CatalogSource>,
}

impl CatalogLookupTool {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for CatalogLookupTool {
    fn name(&self) -> &'static str {
        "consultar_cmdb"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: ServiceInput = serde_json::from_value(input)?;
        info!(api_id = %input.api_id, "consulting CMDB");

        let record = match self.source.get(&input.api_id).await {
            Ok(record) => record,
            Err(error) => return Ok(catalog_backend_failure(&input.api_id, &error)),
        };

        let Some(record) = record else {
            return Ok(json!({
                "encontrado": false,
                "api_id": input.api_id,
                "mensagem": "Serviço/API não encontrado no CMDB",
                "acao_requerida": "Verificar ID do serviço ou cadastrar no CMDB",
            }));
        };

        Ok(json!({
            "encontrado": true,
            "api_id": record.service_id,
            "sigla": record.service_code,
            "direcionador": record.direction,
            "descricao_servico": record.description,
            "tecnologia": record.technology,
            "versao": record.version,
            "responsavel": record.owner,
        }))
    }
}

fn catalog_backend_failure(service_id: &str, error: &SourceError) -> Value {
    warn!(api_id = service_id, %error, "CMDB lookup failed");
    let message = match error {
        SourceError::Timeout(_) => "CMDB não respondeu no tempo esperado.".to_string(),
        SourceError::Connection(_) => "Falha ao conectar com CMDB.".to_string(),
        SourceError::Unknown(detail) => format!("Erro inesperado: {detail}"),
    };
    json!({
        "encontrado": false,
        "erro": error.code(),
        "api_id": service_id,
        "mensagem": message,
        "acao_requerida": error.remediation(),
    })
}

/// Historical-opinion similarity search (`carregar_insumos`).
pub struct HistoryTool {
    source: Arc<dyn HistorySource>,
}

impl HistoryTool {
    pub fn new(source: Arc<dyn HistorySource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for HistoryTool {
    fn name(&self) -> &'static str {
        "carregar_insumos"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: HistoryInput = serde_json::from_value(input)?;
        let tax_id = TaxId::normalize(&input.cnpj);
        info!(cnpj = %tax_id, tipo_servico = %input.tipo_servico, "loading historical inputs");

        match self.source.search(&tax_id, &input.tipo_servico, HISTORY_SEARCH_LIMIT).await {
            Ok(insights) => Ok(serde_json::to_value(insights)?),
            // Degrades to empty insights; history is advisory only.
            Err(error) => {
                warn!(cnpj = %tax_id, %error, "history search failed");
                Ok(json!({
                    "total_encontrados": 0,
                    "pareceres_similares": [],
                    "padroes_identificados": [],
                    "sugestoes_texto": [],
                    "erro": error.to_string(),
                }))
            }
        }
    }
}

/// Prior-opinion caveat retrieval (`carregar_ressalvas`).
pub struct PriorCaveatsTool {
    source: Arc<dyn HistorySource>,
}

impl PriorCaveatsTool {
    pub fn new(source: Arc<dyn HistorySource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for PriorCaveatsTool {
    fn name(&self) -> &'static str {
        "carregar_ressalvas"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: CnpjInput = serde_json::from_value(input)?;
        let tax_id = TaxId::normalize(&input.cnpj);
        info!(cnpj = %tax_id, "loading previous caveats");

        let latest = match self.source.latest(&tax_id).await {
            Ok(latest) => latest,
            Err(error) => {
                warn!(cnpj = %tax_id, %error, "prior opinion lookup failed");
                return Ok(json!({
                    "tem_ressalvas": false,
                    "parecer_anterior_encontrado": false,
                    "ressalvas": [],
                    "erro": error.to_string(),
                }));
            }
        };

        let Some(prior) = latest else {
            return Ok(json!({
                "tem_ressalvas": false,
                "parecer_anterior_encontrado": false,
                "ressalvas": [],
                "mensagem": "Nenhum parecer anterior encontrado para este fornecedor",
            }));
        };

        if prior.caveats.is_empty() {
            return Ok(json!({
                "tem_ressalvas": false,
                "parecer_anterior_encontrado": true,
                "ressalvas": [],
                "parecer_anterior": {
                    "parecer_id": prior.opinion_id,
                    "data_parecer": prior.date,
                    "tipo_parecer": prior.opinion_type,
                },
                "mensagem": "Parecer anterior não continha ressalvas",
            }));
        }

        Ok(json!({
            "tem_ressalvas": true,
            "parecer_anterior_encontrado": true,
            "ressalvas": prior.caveats,
            "parecer_anterior": {
                "parecer_id": prior.opinion_id,
                "data_parecer": prior.date,
                "tipo_parecer": prior.opinion_type,
                "justificativa": prior.justification,
            },
            "acao_requerida": "Incluir ressalvas anteriores no parecer atual se ainda aplicáveis",
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use parecer_core::{ContractRecord, TaxId};
    use parecer_store::{
        fixtures, ContractSource, InMemoryCatalogSource, InMemoryContractSource,
        InMemoryHistorySource, SourceError,
    };

    use crate::tools::Tool;

    use super::{CatalogLookupTool, ContractLookupTool, HistoryTool, PriorCaveatsTool};

    struct FailingContractSource(SourceError);

    #[async_trait::async_trait]
    impl ContractSource for FailingContractSource {
        async fn get(&self, _tax_id: &TaxId) -> Result<Option<ContractRecord>, SourceError> {
            Err(self.0.clone())
        }
    }

    #[tokio::test]
    async fn contract_lookup_is_identical_for_formatted_and_bare_cnpj() {
        let tool =
            ContractLookupTool::new(Arc::new(InMemoryContractSource::new(fixtures::contracts())));

        let formatted = tool
            .execute(json!({"cnpj": "12.345.678/0001-90"}))
            .await
            .expect("formatted lookup");
        let bare =
            tool.execute(json!({"cnpj": "12345678000190"})).await.expect("bare lookup");

        assert_eq!(formatted, bare);
        assert_eq!(formatted["encontrado"], json!(true));
        assert_eq!(formatted["nome_fornecedor"], json!("Tech Solutions LTDA"));
        assert!(formatted["dias_ate_vencimento"].is_i64());
    }

    #[tokio::test]
    async fn contract_not_found_carries_remediation_hint() {
        let tool =
            ContractLookupTool::new(Arc::new(InMemoryContractSource::new(fixtures::contracts())));

        let result = tool.execute(json!({"cnpj": "00000000000000"})).await.expect("lookup");

        assert_eq!(result["encontrado"], json!(false));
        assert_eq!(result["erro"], json!(null));
        assert!(result["acao_requerida"]
            .as_str()
            .unwrap()
            .contains("Cadastrar fornecedor no OneTrust"));
    }

    #[tokio::test]
    async fn contract_without_expiration_reports_null_days() {
        let tool =
            ContractLookupTool::new(Arc::new(InMemoryContractSource::new(fixtures::contracts())));

        let result = tool.execute(json!({"cnpj": "11222333000144"})).await.expect("lookup");

        assert_eq!(result["encontrado"], json!(true));
        assert_eq!(result["data_vencimento_contrato"], json!(null));
        assert_eq!(result["dias_ate_vencimento"], json!(null));
    }

    #[tokio::test]
    async fn backend_timeout_is_a_structured_recoverable_payload() {
        let tool = ContractLookupTool::new(Arc::new(FailingContractSource(
            SourceError::Timeout("onetrust".to_string()),
        )));

        let result = tool.execute(json!({"cnpj": "12345678000190"})).await.expect("lookup");

        assert_eq!(result["encontrado"], json!(false));
        assert_eq!(result["erro"], json!("TIMEOUT"));
        assert_eq!(result["acao_requerida"], json!("Aguardar e tentar novamente"));
    }

    #[tokio::test]
    async fn catalog_lookup_returns_direction_and_owner() {
        let tool =
            CatalogLookupTool::new(Arc::new(InMemoryCatalogSource::new(fixtures::catalog())));

        let result = tool.execute(json!({"api_id": "API-004"})).await.expect("lookup");

        assert_eq!(result["encontrado"], json!(true));
        assert_eq!(result["direcionador"], json!("Desinvestir"));
        assert_eq!(result["sigla"], json!("LEGACY-SYSTEM"));
    }

    #[tokio::test]
    async fn catalog_miss_suggests_registration() {
        let tool =
            CatalogLookupTool::new(Arc::new(InMemoryCatalogSource::new(fixtures::catalog())));

        let result = tool.execute(json!({"api_id": "API-999"})).await.expect("lookup");

        assert_eq!(result["encontrado"], json!(false));
        assert!(result["acao_requerida"].as_str().unwrap().contains("cadastrar no CMDB"));
    }

    #[tokio::test]
    async fn history_tool_returns_insights_for_matching_service_type() {
        let tool =
            HistoryTool::new(Arc::new(InMemoryHistorySource::new(fixtures::opinion_history())));

        let result = tool
            .execute(json!({"cnpj": "98.765.432/0001-01", "tipo_servico": "cloud"}))
            .await
            .expect("search");

        assert_eq!(result["total_encontrados"], json!(2));
        assert!(result["sugestoes_texto"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s.as_str().unwrap().contains("histórico positivo")));
    }

    #[tokio::test]
    async fn history_tool_is_empty_for_unknown_supplier() {
        let tool =
            HistoryTool::new(Arc::new(InMemoryHistorySource::new(fixtures::opinion_history())));

        let result = tool
            .execute(json!({"cnpj": "00000000000000", "tipo_servico": "api"}))
            .await
            .expect("search");

        assert_eq!(result["total_encontrados"], json!(0));
        assert_eq!(result["pareceres_similares"], json!([]));
    }

    #[tokio::test]
    async fn prior_caveats_tool_distinguishes_the_three_outcomes() {
        let tool = PriorCaveatsTool::new(Arc::new(InMemoryHistorySource::new(
            fixtures::opinion_history(),
        )));

        let none = tool.execute(json!({"cnpj": "00000000000000"})).await.expect("lookup");
        assert_eq!(none["parecer_anterior_encontrado"], json!(false));
        assert_eq!(none["tem_ressalvas"], json!(false));

        let no_caveats = tool.execute(json!({"cnpj": "12345678000190"})).await.expect("lookup");
        assert_eq!(no_caveats["parecer_anterior_encontrado"], json!(true));
        assert_eq!(no_caveats["tem_ressalvas"], json!(false));
        assert_eq!(no_caveats["parecer_anterior"]["parecer_id"], json!("PAR-2024-001"));

        let with_caveats =
            tool.execute(json!({"cnpj": "98765432000101"})).await.expect("lookup");
        assert_eq!(with_caveats["tem_ressalvas"], json!(true));
        assert_eq!(with_caveats["ressalvas"].as_array().unwrap().len(), 2);
        assert!(with_caveats["acao_requerida"]
            .as_str()
            .unwrap()
            .contains("Incluir ressalvas anteriores"));
    }
}
