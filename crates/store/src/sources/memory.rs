use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use parecer_core::{CatalogRecord, ContractRecord, FinalizedOpinion, OpinionHistoryEntry, TaxId};

use super::{
    derive_insights, CatalogSource, ContractSource, HistoryInsights, HistorySource, OpinionSink,
    RegistrationReceipt, SourceError,
};

#[derive(Default)]
pub struct InMemoryContractSource {
    records: RwLock<HashMap<String, ContractRecord>>,
}

impl InMemoryContractSource {
    pub fn new(records: impl IntoIterator<Item = ContractRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.tax_id.as_str().to_string(), record))
            .collect();
        Self { records: RwLock::new(records) }
    }
}

#[async_trait::async_trait]
impl ContractSource for InMemoryContractSource {
    async fn get(&self, tax_id: &TaxId) -> Result<Option<ContractRecord>, SourceError> {
        debug!(cnpj = %tax_id, "querying in-memory OneTrust context");
        let records = self.records.read().await;
        Ok(records.get(tax_id.as_str()).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryCatalogSource {
    records: RwLock<HashMap<String, CatalogRecord>>,
}

impl InMemoryCatalogSource {
    pub fn new(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let records =
            records.into_iter().map(|record| (record.service_id.clone(), record)).collect();
        Self { records: RwLock::new(records) }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn get(&self, service_id: &str) -> Result<Option<CatalogRecord>, SourceError> {
        debug!(api_id = service_id, "querying in-memory CMDB");
        let records = self.records.read().await;
        Ok(records.get(service_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryHistorySource {
    entries: RwLock<HashMap<String, Vec<OpinionHistoryEntry>>>,
}

impl InMemoryHistorySource {
    /// Entries are kept in the order given, newest first; `latest`
    /// returns index 0 without re-sorting.
    pub fn new(entries: impl IntoIterator<Item = OpinionHistoryEntry>) -> Self {
        let mut grouped: HashMap<String, Vec<OpinionHistoryEntry>> = HashMap::new();
        for entry in entries {
            grouped.entry(entry.tax_id.as_str().to_string()).or_default().push(entry);
        }
        Self { entries: RwLock::new(grouped) }
    }
}

#[async_trait::async_trait]
impl HistorySource for InMemoryHistorySource {
    async fn latest(&self, tax_id: &TaxId) -> Result<Option<OpinionHistoryEntry>, SourceError> {
        debug!(cnpj = %tax_id, "loading most recent opinion");
        let entries = self.entries.read().await;
        Ok(entries.get(tax_id.as_str()).and_then(|history| history.first().cloned()))
    }

    async fn search(
        &self,
        tax_id: &TaxId,
        service_type: &str,
        limit: usize,
    ) -> Result<HistoryInsights, SourceError> {
        debug!(cnpj = %tax_id, service_type, limit, "searching similar opinions");
        let entries = self.entries.read().await;
        let needle = service_type.to_lowercase();
        let filtered: Vec<OpinionHistoryEntry> = entries
            .get(tax_id.as_str())
            .map(|history| {
                history
                    .iter()
                    .filter(|entry| entry.service_type.to_lowercase().contains(&needle))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(derive_insights(filtered))
    }
}

/// Simulated registration backend. Keeps every accepted record so tests
/// can assert exactly what was (or was not) written.
#[derive(Default)]
pub struct InMemoryOpinionSink {
    saved: RwLock<Vec<FinalizedOpinion>>,
}

impl InMemoryOpinionSink {
    pub async fn saved(&self) -> Vec<FinalizedOpinion> {
        self.saved.read().await.clone()
    }
}

#[async_trait::async_trait]
impl OpinionSink for InMemoryOpinionSink {
    async fn save(&self, opinion: FinalizedOpinion) -> Result<RegistrationReceipt, SourceError> {
        debug!(parecer_id = %opinion.id.0, "registering opinion");
        let receipt = RegistrationReceipt {
            opinion_id: opinion.id.clone(),
            registered_at: opinion.registered_at,
            status: opinion.status,
            next_status: opinion.next_status,
        };
        self.saved.write().await.push(opinion);
        Ok(receipt)
    }
}
