use serde::{Deserialize, Serialize};

use crate::domain::catalog::StrategicDirection;
use crate::domain::opinion::OpinionType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    #[serde(rename = "Renovação")]
    Renovacao,
    #[serde(rename = "Nova Contratação")]
    NovaContratacao,
}

impl RequestType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Renovacao => "Renovação",
            Self::NovaContratacao => "Nova Contratação",
        }
    }

    pub fn label_lower(&self) -> &'static str {
        match self {
            Self::Renovacao => "renovação",
            Self::NovaContratacao => "nova contratação",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataFlow {
    #[serde(rename = "INBOUND")]
    Inbound,
    #[serde(rename = "OUTBOUND")]
    Outbound,
    #[serde(rename = "BIDIRECIONAL")]
    Bidirecional,
}

impl DataFlow {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inbound => "INBOUND",
            Self::Outbound => "OUTBOUND",
            Self::Bidirecional => "BIDIRECIONAL",
        }
    }

    pub fn label_lower(&self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Bidirecional => "bidirecional",
        }
    }
}

/// Most recent verdict on record for the supplier, carried into a
/// renewal evaluation. Callers may supply just the type; caveats are
/// only propagated when present.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriorOpinion {
    pub opinion_type: OpinionType,
    pub caveats: Vec<String>,
}

impl PriorOpinion {
    pub fn of_type(opinion_type: OpinionType) -> Self {
        Self { opinion_type, caveats: Vec::new() }
    }
}

// Legacy payloads send either the bare type label or the full prior
// entry object; accept both shapes.
impl<'de> Deserialize<'de> for PriorOpinion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Entry {
                tipo_parecer: OpinionType,
                #[serde(default)]
                ressalvas: Vec<String>,
            },
            Label(OpinionType),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Entry { tipo_parecer, ressalvas } => {
                Self { opinion_type: tipo_parecer, caveats: ressalvas }
            }
            Wire::Label(opinion_type) => Self::of_type(opinion_type),
        })
    }
}

/// Everything the scoring engine looks at. Built per evaluation, scored,
/// then discarded; the engine reads nothing else.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestAttributeBundle {
    #[serde(rename = "tipo_requisicao")]
    pub request_type: RequestType,
    #[serde(rename = "integracoes_disponiveis", default)]
    pub integrations: Vec<String>,
    #[serde(rename = "fluxo_dados", default)]
    pub data_flow: Option<DataFlow>,
    #[serde(rename = "direcionador", default)]
    pub direction: Option<StrategicDirection>,
    #[serde(rename = "parecer_anterior", default)]
    pub prior_opinion: Option<PriorOpinion>,
    #[serde(rename = "armazena_dados_bv", default)]
    pub stores_bv_data: bool,
}
