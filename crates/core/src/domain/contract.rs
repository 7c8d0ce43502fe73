use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DomainError;

/// Normalized CNPJ. Construction strips every non-digit character, so the
/// formatted ("12.345.678/0001-90") and bare ("12345678000190") spellings
/// of the same supplier key the same record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxId(String);

impl TaxId {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.chars().filter(char::is_ascii_digit).collect())
    }

    /// Strict constructor for request intake; lookups use [`normalize`]
    /// and tolerate malformed input.
    ///
    /// [`normalize`]: TaxId::normalize
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let id = Self::normalize(raw);
        if !id.is_well_formed() {
            return Err(DomainError::InvalidTaxId { raw: raw.to_string() });
        }
        Ok(id)
    }

    /// A CNPJ has exactly 14 digits. Lookups tolerate malformed ids (they
    /// simply miss), but request intake should reject them up front.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 14
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplier contract context as maintained in OneTrust. Read-only here;
/// onboarding is an external process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub tax_id: TaxId,
    pub registered: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub contract_type: Option<String>,
    pub supplier_name: Option<String>,
    pub context: BTreeMap<String, Value>,
    pub last_updated: Option<String>,
}

impl ContractRecord {
    pub fn days_to_expiration(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - now).num_days())
    }
}
