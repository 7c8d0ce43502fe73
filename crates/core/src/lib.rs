pub mod config;
pub mod domain;
pub mod errors;
pub mod expiration;
pub mod registration;
pub mod scoring;

pub use config::{AppConfig, BackendMode, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::catalog::{CatalogRecord, StrategicDirection};
pub use domain::contract::{ContractRecord, TaxId};
pub use domain::opinion::{
    FinalizedOpinion, OpinionHistoryEntry, OpinionId, OpinionStatus, OpinionType,
};
pub use domain::request::{DataFlow, PriorOpinion, RequestAttributeBundle, RequestType};
pub use errors::DomainError;
pub use expiration::{classify_expiration, ExpirationCheck, ExpirationStatus};
pub use registration::{finalize_draft, OpinionDraft, AGENT_VERSION, ANALYST_LABEL};
pub use scoring::{
    classify, DeterministicScoringEngine, ScoredOpinion, ScoringEngine, ScoringWeights,
    DEFAULT_WEIGHTS,
};
