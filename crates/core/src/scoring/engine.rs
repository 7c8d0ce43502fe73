use tracing::debug;

use crate::domain::opinion::OpinionType;
use crate::domain::request::{DataFlow, RequestAttributeBundle, RequestType};
use crate::domain::catalog::StrategicDirection;

use super::{
    ScoredOpinion, ScoringWeights, BASE_SCORE, CAVEAT_THRESHOLD, DEFAULT_WEIGHTS,
    FAVORABLE_THRESHOLD, MODERN_INTEGRATIONS, MULTIPLE_INTEGRATIONS_MIN,
};

pub trait ScoringEngine: Send + Sync {
    fn score(&self, bundle: &RequestAttributeBundle) -> ScoredOpinion;
}

pub struct DeterministicScoringEngine {
    weights: ScoringWeights,
}

impl DeterministicScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl Default for DeterministicScoringEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHTS)
    }
}

impl ScoringEngine for DeterministicScoringEngine {
    fn score(&self, bundle: &RequestAttributeBundle) -> ScoredOpinion {
        let weights = &self.weights;
        let mut score = BASE_SCORE;
        let mut criteria = Vec::new();
        let mut caveats = Vec::new();
        let mut inputs = Vec::new();

        // Rule 1: prior opinion, renewal requests only.
        if bundle.request_type == RequestType::Renovacao {
            inputs.push("Tipo de requisição: Renovação".to_string());

            match &bundle.prior_opinion {
                Some(prior) => {
                    inputs.push(format!("Parecer anterior: {}", prior.opinion_type.label()));
                    match prior.opinion_type {
                        OpinionType::Favoravel => {
                            score += weights.prior_favoravel;
                            criteria.push("Parecer anterior foi favorável".to_string());
                        }
                        OpinionType::FavoravelComRessalvas => {
                            score += weights.prior_com_ressalvas;
                            criteria
                                .push("Parecer anterior foi favorável com ressalvas".to_string());
                            caveats.extend(prior.caveats.iter().cloned());
                        }
                        OpinionType::Desfavoravel => {
                            score -= weights.prior_desfavoravel;
                            criteria.push("Parecer anterior foi desfavorável".to_string());
                        }
                    }
                }
                None => {
                    criteria.push("Renovação sem histórico de parecer anterior".to_string());
                }
            }
        }

        // Rule 2: available integrations.
        if !bundle.integrations.is_empty() {
            inputs.push(format!(
                "Integrações disponíveis: {}",
                bundle.integrations.join(", ")
            ));

            if bundle.integrations.len() >= MULTIPLE_INTEGRATIONS_MIN {
                score += weights.multiple_integrations;
                criteria.push("Múltiplas integrações disponíveis (≥3)".to_string());
            } else {
                score += weights.some_integrations;
                criteria.push("Integrações disponíveis".to_string());
            }

            let has_modern = bundle.integrations.iter().any(|integration| {
                MODERN_INTEGRATIONS
                    .iter()
                    .any(|modern| integration.eq_ignore_ascii_case(modern))
            });
            if has_modern {
                score += weights.modern_integration;
                criteria.push("Suporte a tecnologias modernas".to_string());
            }
        }

        // Rule 3: data flow.
        if let Some(flow) = bundle.data_flow {
            inputs.push(format!("Fluxo de dados: {}", flow.label()));

            match flow {
                DataFlow::Bidirecional => {
                    score += weights.bidirectional_flow;
                    criteria.push("Suporta fluxo bidirecional".to_string());
                }
                DataFlow::Inbound | DataFlow::Outbound => {
                    score += weights.single_direction_flow;
                    criteria.push(format!("Suporta fluxo {}", flow.label_lower()));
                }
            }
        }

        // Rule 4: CMDB strategic direction.
        if let Some(direction) = bundle.direction {
            inputs.push(format!("Direcionador CMDB: {}", direction.label()));

            match direction {
                StrategicDirection::Evoluir => {
                    score += weights.direction_evoluir;
                    criteria.push("Serviço marcado para evolução no CMDB".to_string());
                }
                StrategicDirection::Manter => {
                    score += weights.direction_manter;
                    criteria.push("Serviço em manutenção no CMDB".to_string());
                }
                StrategicDirection::Desinvestir => {
                    score -= weights.direction_desinvestir;
                    criteria.push("Serviço marcado para desinvestimento no CMDB".to_string());
                    caveats.push(
                        "Serviço está marcado como 'Desinvestir' no CMDB. Avaliar necessidade \
                         de contratação/renovação considerando descontinuação futura."
                            .to_string(),
                    );
                }
            }
        }

        // Rule 5: supplier keeps BV data on its own infrastructure.
        if bundle.stores_bv_data {
            inputs.push("Armazena dados do BV: Sim".to_string());
            score -= weights.stores_bv_data;
            criteria.push("Armazena dados do BV (requer atenção adicional)".to_string());
            caveats.push(
                "Fornecedor armazena dados do Banco BV em sua infraestrutura. Verificar \
                 conformidade com políticas de segurança e LGPD."
                    .to_string(),
            );
        }

        let opinion_type = classify(score);
        // The sum can exceed 1.0 when every positive rule fires; the
        // reported confidence is clamped, the classification above is not.
        let confidence = (score.clamp(0.0, 1.0) * 100.0).round() / 100.0;

        let justification = match opinion_type {
            OpinionType::Favoravel => format!(
                "Requisição atende todos os critérios estabelecidos. Score de conformidade: \
                 {confidence:.2}. Recomendado prosseguir com a {}.",
                bundle.request_type.label_lower()
            ),
            OpinionType::FavoravelComRessalvas => {
                if caveats.is_empty() {
                    caveats.push(
                        "Monitorar evolução do serviço conforme roadmap tecnológico".to_string(),
                    );
                }
                format!(
                    "Requisição atende os critérios principais com observações. Score de \
                     conformidade: {confidence:.2}. Recomendado prosseguir com ressalvas \
                     documentadas."
                )
            }
            OpinionType::Desfavoravel => {
                if caveats.is_empty() {
                    caveats.push(
                        "Requisição requer análise adicional antes de aprovação".to_string(),
                    );
                }
                format!(
                    "Requisição não atende critérios mínimos estabelecidos. Score de \
                     conformidade: {confidence:.2}. Recomendado revisar adequação do \
                     fornecedor/serviço."
                )
            }
        };

        debug!(
            score,
            confidence,
            parecer = opinion_type.label(),
            criterios = criteria.len(),
            "scored opinion bundle"
        );

        ScoredOpinion {
            opinion_type,
            justification,
            caveats,
            applied_criteria: criteria,
            consulted_inputs: inputs,
            confidence,
            request_type: bundle.request_type,
        }
    }
}

/// Threshold buckets, both boundaries inclusive on the upper side.
pub fn classify(score: f64) -> OpinionType {
    if score >= FAVORABLE_THRESHOLD {
        OpinionType::Favoravel
    } else if score >= CAVEAT_THRESHOLD {
        OpinionType::FavoravelComRessalvas
    } else {
        OpinionType::Desfavoravel
    }
}
