use serde::{Deserialize, Serialize};

/// Strategic direction assigned to a service in the CMDB
/// ("direcionador"). Wire values keep the catalog's Portuguese labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategicDirection {
    #[serde(rename = "Evoluir")]
    Evoluir,
    #[serde(rename = "Manter")]
    Manter,
    #[serde(rename = "Desinvestir")]
    Desinvestir,
}

impl StrategicDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Evoluir => "Evoluir",
            Self::Manter => "Manter",
            Self::Desinvestir => "Desinvestir",
        }
    }
}

/// Service/API entry as maintained in the CMDB. Read-only here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub service_id: String,
    pub registered: bool,
    pub service_code: Option<String>,
    pub direction: Option<StrategicDirection>,
    pub description: Option<String>,
    pub technology: Option<String>,
    pub version: Option<String>,
    pub owner: Option<String>,
}
