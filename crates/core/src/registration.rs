//! Registration intake: validate a draft and mint the immutable record.
//!
//! Validation fails closed, returning the exact list of missing fields
//! and creating nothing. Persistence is the store layer's problem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::StrategicDirection;
use crate::domain::contract::TaxId;
use crate::domain::opinion::{FinalizedOpinion, OpinionId, OpinionStatus, OpinionType};
use crate::domain::request::RequestType;
use crate::errors::DomainError;

pub const ANALYST_LABEL: &str = "Agente IA - Parecerista ANS";
pub const AGENT_VERSION: &str = "1.0";

const REQUIRED_FIELDS: [&str; 6] = [
    "cnpj",
    "nome_fornecedor",
    "api_id",
    "tipo_requisicao",
    "parecer_sugerido",
    "justificativa",
];

/// Opinion fields as submitted for registration, everything optional
/// until validated. Wire keys follow the registration payload format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpinionDraft {
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub nome_fornecedor: Option<String>,
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub sigla_servico: Option<String>,
    #[serde(default)]
    pub direcionador: Option<StrategicDirection>,
    #[serde(default)]
    pub tipo_requisicao: Option<RequestType>,
    #[serde(default)]
    pub parecer_sugerido: Option<OpinionType>,
    #[serde(default)]
    pub justificativa: Option<String>,
    #[serde(default)]
    pub ressalvas: Vec<String>,
    #[serde(default)]
    pub email_solicitante: Option<String>,
    #[serde(default)]
    pub diretoria_solicitante: Option<String>,
    #[serde(default)]
    pub score_confianca: Option<f64>,
    #[serde(default)]
    pub criterios_aplicados: Vec<String>,
    #[serde(default)]
    pub insumos_utilizados: Vec<String>,
}

impl OpinionDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let absent = |value: &Option<String>| value.as_deref().map_or(true, str::is_empty);

        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| match *field {
                "cnpj" => absent(&self.cnpj),
                "nome_fornecedor" => absent(&self.nome_fornecedor),
                "api_id" => absent(&self.api_id),
                "tipo_requisicao" => self.tipo_requisicao.is_none(),
                "parecer_sugerido" => self.parecer_sugerido.is_none(),
                "justificativa" => absent(&self.justificativa),
                _ => unreachable!(),
            })
            .collect()
    }
}

/// Validate the draft and build the finalized record. The confidence
/// score is clamped to [0, 1] before storage; the identifier is minted
/// here so retries against an unavailable sink produce fresh ids.
pub fn finalize_draft(
    draft: OpinionDraft,
    now: DateTime<Utc>,
) -> Result<FinalizedOpinion, DomainError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(DomainError::MissingRequiredFields { fields: missing });
    }

    Ok(FinalizedOpinion {
        id: OpinionId::generate(now),
        tax_id: TaxId::normalize(draft.cnpj.as_deref().unwrap_or_default()),
        supplier_name: draft.nome_fornecedor.unwrap_or_default(),
        service_id: draft.api_id.unwrap_or_default(),
        service_code: draft.sigla_servico,
        direction: draft.direcionador,
        request_type: draft.tipo_requisicao.unwrap_or(RequestType::NovaContratacao),
        opinion_type: draft.parecer_sugerido.unwrap_or(OpinionType::Desfavoravel),
        justification: draft.justificativa.unwrap_or_default(),
        caveats: draft.ressalvas,
        analyst: ANALYST_LABEL.to_string(),
        requester_email: draft.email_solicitante,
        requester_directorate: draft.diretoria_solicitante,
        confidence: draft.score_confianca.map(|score| score.clamp(0.0, 1.0)),
        applied_criteria: draft.criterios_aplicados,
        consulted_inputs: draft.insumos_utilizados,
        registered_at: now,
        status: OpinionStatus::Registered,
        next_status: OpinionStatus::AwaitingAnalystReview,
        agent_version: AGENT_VERSION.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::domain::opinion::{OpinionStatus, OpinionType};
    use crate::domain::request::RequestType;
    use crate::errors::DomainError;

    use super::{finalize_draft, OpinionDraft, ANALYST_LABEL};

    fn complete_draft() -> OpinionDraft {
        OpinionDraft {
            cnpj: Some("12.345.678/0001-90".to_string()),
            nome_fornecedor: Some("Tech Solutions LTDA".to_string()),
            api_id: Some("API-001".to_string()),
            tipo_requisicao: Some(RequestType::Renovacao),
            parecer_sugerido: Some(OpinionType::Favoravel),
            justificativa: Some("Fornecedor com histórico positivo.".to_string()),
            score_confianca: Some(0.92),
            ..Default::default()
        }
    }

    #[test]
    fn complete_draft_finalizes_with_normalized_cnpj_and_status() {
        let opinion = finalize_draft(complete_draft(), Utc::now()).expect("finalize");

        assert_eq!(opinion.tax_id.as_str(), "12345678000190");
        assert_eq!(opinion.status, OpinionStatus::Registered);
        assert_eq!(opinion.next_status, OpinionStatus::AwaitingAnalystReview);
        assert_eq!(opinion.analyst, ANALYST_LABEL);
        assert!(opinion.id.0.starts_with("PAR-"));
    }

    #[test]
    fn missing_fields_are_listed_exactly() {
        let mut draft = complete_draft();
        draft.justificativa = None;
        draft.nome_fornecedor = Some(String::new());

        let error = finalize_draft(draft, Utc::now()).expect_err("must fail");

        match error {
            DomainError::MissingRequiredFields { fields } => {
                assert_eq!(fields, vec!["nome_fornecedor", "justificativa"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_draft_lists_all_required_fields() {
        let error = finalize_draft(OpinionDraft::default(), Utc::now()).expect_err("must fail");

        match error {
            DomainError::MissingRequiredFields { fields } => {
                assert_eq!(
                    fields,
                    vec![
                        "cnpj",
                        "nome_fornecedor",
                        "api_id",
                        "tipo_requisicao",
                        "parecer_sugerido",
                        "justificativa"
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_confidence_is_clamped_before_storage() {
        let mut draft = complete_draft();
        draft.score_confianca = Some(1.4);

        let opinion = finalize_draft(draft, Utc::now()).expect("finalize");
        assert_eq!(opinion.confidence, Some(1.0));
    }

    #[test]
    fn optional_requester_metadata_is_carried_through() {
        let mut draft = complete_draft();
        draft.email_solicitante = Some("solicitante@bv.com.br".to_string());
        draft.diretoria_solicitante = Some("Diretoria de Tecnologia".to_string());
        draft.sigla_servico = Some("CRM-API".to_string());

        let opinion = finalize_draft(draft, Utc::now()).expect("finalize");

        assert_eq!(opinion.requester_email.as_deref(), Some("solicitante@bv.com.br"));
        assert_eq!(opinion.service_code.as_deref(), Some("CRM-API"));
    }
}
