pub mod fixtures;
pub mod sources;

pub use sources::{
    derive_insights, CatalogSource, ContractSource, HistoryInsights, HistorySource,
    InMemoryCatalogSource, InMemoryContractSource, InMemoryHistorySource, InMemoryOpinionSink,
    OpinionSink, RegistrationReceipt, SourceError, HISTORY_SEARCH_LIMIT,
};

use std::sync::Arc;

use parecer_core::{AppConfig, BackendMode};

/// The four record-store capabilities bundled for injection into the
/// tool layer.
#[derive(Clone)]
pub struct Backends {
    pub contracts: Arc<dyn ContractSource>,
    pub catalog: Arc<dyn CatalogSource>,
    pub history: Arc<dyn HistorySource>,
    pub opinions: Arc<dyn OpinionSink>,
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends").finish_non_exhaustive()
    }
}

impl Backends {
    /// In-memory backends pre-loaded with the demo fixtures.
    pub fn seeded() -> Self {
        Self {
            contracts: Arc::new(InMemoryContractSource::new(fixtures::contracts())),
            catalog: Arc::new(InMemoryCatalogSource::new(fixtures::catalog())),
            history: Arc::new(InMemoryHistorySource::new(fixtures::opinion_history())),
            opinions: Arc::new(InMemoryOpinionSink::default()),
        }
    }
}

/// Select backends from configuration. Replaces the environment-flag
/// singleton selection of the legacy system with an explicit factory.
pub fn build_backends(config: &AppConfig) -> Result<Backends, SourceError> {
    match config.backend {
        BackendMode::Mock => Ok(Backends::seeded()),
        BackendMode::Api => Err(SourceError::Unknown(
            "backend de API não implementado; utilizar modo mock".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use parecer_core::{AppConfig, BackendMode};

    use super::build_backends;

    #[test]
    fn mock_mode_builds_seeded_backends() {
        assert!(build_backends(&AppConfig::default()).is_ok());
    }

    #[test]
    fn api_mode_is_reported_as_unavailable() {
        let mut config = AppConfig::default();
        config.backend = BackendMode::Api;

        let error = build_backends(&config).expect_err("api backend must be unavailable");
        assert_eq!(error.code(), "UNKNOWN");
    }
}
