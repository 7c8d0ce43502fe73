mod memory;

pub use memory::{
    InMemoryCatalogSource, InMemoryContractSource, InMemoryHistorySource, InMemoryOpinionSink,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use parecer_core::{
    CatalogRecord, ContractRecord, FinalizedOpinion, OpinionHistoryEntry, OpinionId,
    OpinionStatus, OpinionType, TaxId,
};

/// Maximum entries returned by a history search.
pub const HISTORY_SEARCH_LIMIT: usize = 5;

/// Backend failures as seen by the tools. All variants are recoverable:
/// the caller retries or escalates, nothing here is fatal. The in-memory
/// sources never produce them; they model the real integrations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("tempo de resposta excedido: {0}")]
    Timeout(String),
    #[error("falha de conexão: {0}")]
    Connection(String),
    #[error("erro inesperado: {0}")]
    Unknown(String),
}

impl SourceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "TIMEOUT",
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "Aguardar e tentar novamente",
            Self::Connection(_) => "Verificar conectividade e tentar novamente",
            Self::Unknown(_) => "Contatar suporte técnico",
        }
    }
}

/// OneTrust-equivalent contract store.
#[async_trait::async_trait]
pub trait ContractSource: Send + Sync {
    async fn get(&self, tax_id: &TaxId) -> Result<Option<ContractRecord>, SourceError>;
}

/// CMDB-equivalent service catalog.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn get(&self, service_id: &str) -> Result<Option<CatalogRecord>, SourceError>;
}

/// Historical opinions per supplier, newest first.
#[async_trait::async_trait]
pub trait HistorySource: Send + Sync {
    /// Most recent entry: index 0 of the stored list. Insertion order
    /// is authoritative, entries are not re-sorted by date.
    async fn latest(&self, tax_id: &TaxId) -> Result<Option<OpinionHistoryEntry>, SourceError>;

    async fn search(
        &self,
        tax_id: &TaxId,
        service_type: &str,
        limit: usize,
    ) -> Result<HistoryInsights, SourceError>;
}

/// Write path for finalized opinions.
#[async_trait::async_trait]
pub trait OpinionSink: Send + Sync {
    async fn save(&self, opinion: FinalizedOpinion) -> Result<RegistrationReceipt, SourceError>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    #[serde(rename = "parecer_id")]
    pub opinion_id: OpinionId,
    #[serde(rename = "data_registro")]
    pub registered_at: DateTime<Utc>,
    pub status: OpinionStatus,
    #[serde(rename = "proximo_status")]
    pub next_status: OpinionStatus,
}

/// Outcome of a similarity search over the opinion history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryInsights {
    #[serde(rename = "total_encontrados")]
    pub total: usize,
    #[serde(rename = "pareceres_similares")]
    pub entries: Vec<OpinionHistoryEntry>,
    #[serde(rename = "padroes_identificados")]
    pub patterns: Vec<String>,
    #[serde(rename = "sugestoes_texto")]
    pub suggestions: Vec<String>,
}

/// Derive pattern observations and text suggestions from the filtered
/// entries. Shared by every backend so the derived lines stay uniform.
pub fn derive_insights(entries: Vec<OpinionHistoryEntry>) -> HistoryInsights {
    let mut patterns = Vec::new();
    let mut suggestions = Vec::new();

    if !entries.is_empty() {
        // Counted in encounter order; on a tie the type seen first wins.
        let mut counts: Vec<(OpinionType, usize)> = Vec::new();
        for entry in &entries {
            match counts.iter_mut().find(|(opinion_type, _)| *opinion_type == entry.opinion_type) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.opinion_type, 1)),
            }
        }
        let (mut most_common, mut count) = counts[0];
        for &(opinion_type, candidate) in &counts[1..] {
            if candidate > count {
                most_common = opinion_type;
                count = candidate;
            }
        }
        patterns.push(format!(
            "Histórico mostra {count} parecer(es) do tipo: {}",
            most_common.label()
        ));

        if entries.iter().any(|entry| entry.opinion_type == OpinionType::Favoravel) {
            suggestions.push("Fornecedor com histórico positivo de entregas".to_string());
        }

        if entries.iter().any(|entry| !entry.caveats.is_empty()) {
            patterns.push(
                "Pareceres anteriores continham ressalvas que devem ser consideradas".to_string(),
            );
        }
    }

    HistoryInsights { total: entries.len(), entries, patterns, suggestions }
}

#[cfg(test)]
mod tests {
    use parecer_core::{OpinionHistoryEntry, OpinionId, OpinionType, TaxId};

    use super::{derive_insights, SourceError};

    fn entry(opinion_type: OpinionType, caveats: Vec<String>) -> OpinionHistoryEntry {
        OpinionHistoryEntry {
            opinion_id: OpinionId("PAR-2024-001".to_string()),
            date: "2024-01-15".to_string(),
            opinion_type,
            justification: "Fornecedor com histórico positivo.".to_string(),
            caveats,
            analyst: "João Silva".to_string(),
            tax_id: TaxId::normalize("12345678000190"),
            service_type: "API de CRM".to_string(),
        }
    }

    #[test]
    fn error_codes_distinguish_backend_failures() {
        assert_eq!(SourceError::Timeout("onetrust".into()).code(), "TIMEOUT");
        assert_eq!(SourceError::Connection("cmdb".into()).code(), "CONNECTION_ERROR");
        assert_eq!(SourceError::Unknown("boom".into()).code(), "UNKNOWN");
    }

    #[test]
    fn empty_history_derives_empty_insights() {
        let insights = derive_insights(Vec::new());

        assert_eq!(insights.total, 0);
        assert!(insights.patterns.is_empty());
        assert!(insights.suggestions.is_empty());
    }

    #[test]
    fn favorable_history_produces_positive_suggestion() {
        let insights = derive_insights(vec![entry(OpinionType::Favoravel, Vec::new())]);

        assert_eq!(insights.total, 1);
        assert!(insights.patterns[0].contains("1 parecer(es) do tipo: Parecer Favorável"));
        assert_eq!(
            insights.suggestions,
            vec!["Fornecedor com histórico positivo de entregas".to_string()]
        );
    }

    #[test]
    fn tied_type_counts_resolve_to_the_first_encountered_type() {
        let insights = derive_insights(vec![
            entry(OpinionType::Favoravel, Vec::new()),
            entry(OpinionType::FavoravelComRessalvas, Vec::new()),
        ]);

        assert_eq!(
            insights.patterns[0],
            "Histórico mostra 1 parecer(es) do tipo: Parecer Favorável"
        );
    }

    #[test]
    fn caveated_history_flags_prior_caveats_pattern() {
        let insights = derive_insights(vec![entry(
            OpinionType::FavoravelComRessalvas,
            vec!["SLA deve ser revisado após 6 meses de operação".to_string()],
        )]);

        assert!(insights
            .patterns
            .iter()
            .any(|pattern| pattern.contains("continham ressalvas")));
        assert!(insights.suggestions.is_empty());
    }
}
