use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::StrategicDirection;
use crate::domain::contract::TaxId;
use crate::domain::request::RequestType;

/// Identifier of a registered opinion, format `PAR-<year>-<8 hex>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpinionId(pub String);

impl OpinionId {
    /// Random UUID truncation, no collision check. Acceptable for the
    /// in-memory backend; a real sink must enforce uniqueness.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        Self(format!("PAR-{}-{}", now.year(), suffix))
    }
}

/// The three possible verdicts. Wire values keep the Portuguese labels
/// the downstream review workflow expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpinionType {
    #[serde(rename = "Parecer Favorável")]
    Favoravel,
    #[serde(rename = "Parecer Favorável com Ressalvas")]
    FavoravelComRessalvas,
    #[serde(rename = "Parecer Desfavorável")]
    Desfavoravel,
}

impl OpinionType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Favoravel => "Parecer Favorável",
            Self::FavoravelComRessalvas => "Parecer Favorável com Ressalvas",
            Self::Desfavoravel => "Parecer Desfavorável",
        }
    }
}

/// One historical opinion for a supplier. Entries are stored newest
/// first; index 0 is the most recent (insertion order, deliberately not
/// timestamp-sorted).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpinionHistoryEntry {
    #[serde(rename = "parecer_id")]
    pub opinion_id: OpinionId,
    #[serde(rename = "data_parecer")]
    pub date: String,
    #[serde(rename = "tipo_parecer")]
    pub opinion_type: OpinionType,
    #[serde(rename = "justificativa")]
    pub justification: String,
    #[serde(rename = "ressalvas")]
    pub caveats: Vec<String>,
    #[serde(rename = "analista")]
    pub analyst: String,
    #[serde(rename = "cnpj_fornecedor")]
    pub tax_id: TaxId,
    #[serde(rename = "tipo_servico")]
    pub service_type: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpinionStatus {
    #[serde(rename = "REGISTRADO")]
    Registered,
    #[serde(rename = "AGUARDANDO_REVISAO_ANALISTA")]
    AwaitingAnalystReview,
}

/// A registered opinion, immutable after creation. The downstream
/// analyst review workflow owns any later status movement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalizedOpinion {
    #[serde(rename = "parecer_id")]
    pub id: OpinionId,
    #[serde(rename = "cnpj")]
    pub tax_id: TaxId,
    #[serde(rename = "nome_fornecedor")]
    pub supplier_name: String,
    #[serde(rename = "api_id")]
    pub service_id: String,
    #[serde(rename = "sigla_servico")]
    pub service_code: Option<String>,
    #[serde(rename = "direcionador")]
    pub direction: Option<StrategicDirection>,
    #[serde(rename = "tipo_requisicao")]
    pub request_type: RequestType,
    #[serde(rename = "tipo_parecer")]
    pub opinion_type: OpinionType,
    #[serde(rename = "justificativa")]
    pub justification: String,
    #[serde(rename = "ressalvas")]
    pub caveats: Vec<String>,
    #[serde(rename = "analista")]
    pub analyst: String,
    #[serde(rename = "email_solicitante")]
    pub requester_email: Option<String>,
    #[serde(rename = "diretoria_solicitante")]
    pub requester_directorate: Option<String>,
    #[serde(rename = "score_confianca")]
    pub confidence: Option<f64>,
    #[serde(rename = "criterios_aplicados")]
    pub applied_criteria: Vec<String>,
    #[serde(rename = "insumos_utilizados")]
    pub consulted_inputs: Vec<String>,
    #[serde(rename = "data_registro")]
    pub registered_at: DateTime<Utc>,
    pub status: OpinionStatus,
    #[serde(rename = "proximo_status")]
    pub next_status: OpinionStatus,
    #[serde(rename = "versao_agente")]
    pub agent_version: String,
}
