//! End-to-end evaluation flow: contract lookup, expiration gate,
//! catalog and history enrichment, scoring, draft assembly.
//!
//! The flow stops at a draft. Registration is a separate call so a
//! caller (or a human) can inspect the suggestion before committing it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use parecer_core::{
    classify_expiration, finalize_draft, DataFlow, DomainError, ExpirationCheck, OpinionDraft,
    PriorOpinion, RequestAttributeBundle, RequestType, ScoredOpinion, ScoringEngine, TaxId,
};
use parecer_store::{Backends, RegistrationReceipt, SourceError};

/// One supplier/service evaluation as submitted by the caller.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EvaluationRequest {
    pub cnpj: String,
    pub api_id: String,
    #[serde(rename = "tipo_requisicao")]
    pub request_type: RequestType,
    #[serde(rename = "integracoes_disponiveis", default)]
    pub integrations: Vec<String>,
    #[serde(rename = "fluxo_dados", default)]
    pub data_flow: Option<DataFlow>,
    #[serde(rename = "armazena_dados_bv", default)]
    pub stores_bv_data: bool,
    #[serde(rename = "email_solicitante", default)]
    pub requester_email: Option<String>,
    #[serde(rename = "diretoria_solicitante", default)]
    pub requester_directorate: Option<String>,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    InvalidRequest(#[from] DomainError),
    #[error("fornecedor não encontrado no OneTrust: {cnpj}")]
    ContractNotFound { cnpj: String },
    #[error(transparent)]
    Backend(#[from] SourceError),
}

/// Result of an evaluation. A renewal against a contract with no usable
/// expiration date never reaches the scorer.
#[derive(Clone, Debug)]
pub enum FlowOutcome {
    Blocked { expiration: ExpirationCheck },
    Evaluated { expiration: ExpirationCheck, scored: ScoredOpinion, draft: OpinionDraft },
}

pub struct OpinionFlow<E> {
    backends: Backends,
    engine: E,
}

impl<E> OpinionFlow<E>
where
    E: ScoringEngine,
{
    pub fn new(backends: Backends, engine: E) -> Self {
        Self { backends, engine }
    }

    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<FlowOutcome, FlowError> {
        let tax_id = TaxId::parse(&request.cnpj)?;
        info!(cnpj = %tax_id, api_id = %request.api_id, "evaluating opinion request");

        let contract = self
            .backends
            .contracts
            .get(&tax_id)
            .await?
            .ok_or_else(|| FlowError::ContractNotFound { cnpj: tax_id.as_str().to_string() })?;

        let now = Utc::now();
        let expiration_date = contract.expires_at.map(|date| date.to_rfc3339());
        let expiration =
            classify_expiration(expiration_date.as_deref(), contract.days_to_expiration(now));

        // Governance gate: renewals need a registered expiration date.
        if request.request_type == RequestType::Renovacao && expiration.blocks_renewal() {
            warn!(cnpj = %tax_id, "renewal blocked by expiration check");
            return Ok(FlowOutcome::Blocked { expiration });
        }

        let service = self.backends.catalog.get(&request.api_id).await?;
        let direction = service.as_ref().and_then(|record| record.direction);

        let prior_opinion = if request.request_type == RequestType::Renovacao {
            self.backends.history.latest(&tax_id).await?.map(|entry| PriorOpinion {
                opinion_type: entry.opinion_type,
                caveats: entry.caveats,
            })
        } else {
            None
        };

        let bundle = RequestAttributeBundle {
            request_type: request.request_type,
            integrations: request.integrations.clone(),
            data_flow: request.data_flow,
            direction,
            prior_opinion,
            stores_bv_data: request.stores_bv_data,
        };
        let scored = self.engine.score(&bundle);

        let draft = OpinionDraft {
            cnpj: Some(tax_id.as_str().to_string()),
            nome_fornecedor: contract.supplier_name.clone(),
            api_id: Some(request.api_id.clone()),
            sigla_servico: service.as_ref().and_then(|record| record.service_code.clone()),
            direcionador: direction,
            tipo_requisicao: Some(request.request_type),
            parecer_sugerido: Some(scored.opinion_type),
            justificativa: Some(scored.justification.clone()),
            ressalvas: scored.caveats.clone(),
            email_solicitante: request.requester_email.clone(),
            diretoria_solicitante: request.requester_directorate.clone(),
            score_confianca: Some(scored.confidence),
            criterios_aplicados: scored.applied_criteria.clone(),
            insumos_utilizados: scored.consulted_inputs.clone(),
        };

        Ok(FlowOutcome::Evaluated { expiration, scored, draft })
    }

    /// Validate and persist a draft.
    pub async fn register(&self, draft: OpinionDraft) -> Result<RegistrationReceipt, FlowError> {
        let opinion = finalize_draft(draft, Utc::now())?;
        let receipt = self.backends.opinions.save(opinion).await?;
        info!(parecer_id = %receipt.opinion_id.0, "opinion registered");
        Ok(receipt)
    }
}
