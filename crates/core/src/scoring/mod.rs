//! Additive rule-based opinion scorer.
//!
//! Maps a request-attribute bundle to one of three verdicts through a
//! deterministic weighted sum over six categorical inputs. Pure and
//! total: no I/O, no randomness, never fails for well-typed input.

mod engine;

pub use engine::{classify, DeterministicScoringEngine, ScoringEngine};

use serde::{Deserialize, Serialize};

use crate::domain::opinion::OpinionType;
use crate::domain::request::RequestType;

/// Score deltas applied by each rule. Kept as data so future tuning
/// does not touch the rule walk itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringWeights {
    pub prior_favoravel: f64,
    pub prior_com_ressalvas: f64,
    pub prior_desfavoravel: f64,
    pub multiple_integrations: f64,
    pub some_integrations: f64,
    pub modern_integration: f64,
    pub bidirectional_flow: f64,
    pub single_direction_flow: f64,
    pub direction_evoluir: f64,
    pub direction_manter: f64,
    pub direction_desinvestir: f64,
    pub stores_bv_data: f64,
}

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    prior_favoravel: 0.3,
    prior_com_ressalvas: 0.15,
    prior_desfavoravel: 0.2,
    multiple_integrations: 0.2,
    some_integrations: 0.1,
    modern_integration: 0.1,
    bidirectional_flow: 0.15,
    single_direction_flow: 0.1,
    direction_evoluir: 0.15,
    direction_manter: 0.05,
    direction_desinvestir: 0.2,
    stores_bv_data: 0.1,
};

/// Neutral starting score.
pub const BASE_SCORE: f64 = 0.5;

/// At or above: Parecer Favorável.
pub const FAVORABLE_THRESHOLD: f64 = 0.8;

/// At or above (but below favorable): Parecer Favorável com Ressalvas.
pub const CAVEAT_THRESHOLD: f64 = 0.5;

/// Integration labels counted as modern, matched case-insensitively.
pub const MODERN_INTEGRATIONS: [&str; 3] = ["REST", "WEBHOOK", "MENSAGERIA"];

/// Integrations required for the multiple-integrations bonus.
pub const MULTIPLE_INTEGRATIONS_MIN: usize = 3;

/// Verdict plus the full reasoning trail behind it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredOpinion {
    #[serde(rename = "parecer_sugerido")]
    pub opinion_type: OpinionType,
    #[serde(rename = "justificativa")]
    pub justification: String,
    #[serde(rename = "ressalvas")]
    pub caveats: Vec<String>,
    #[serde(rename = "criterios_aplicados")]
    pub applied_criteria: Vec<String>,
    #[serde(rename = "insumos_utilizados")]
    pub consulted_inputs: Vec<String>,
    /// Clamped to [0, 1] and rounded to two decimals. Classification
    /// itself runs on the unclamped sum.
    #[serde(rename = "score_confianca")]
    pub confidence: f64,
    #[serde(rename = "tipo_requisicao")]
    pub request_type: RequestType,
}
