//! Contract expiration governance check.
//!
//! Renewals may only proceed when the contract record carries an
//! expiration date. A missing date is a business-policy hard stop, not
//! a technical failure; a date more than two years out is informational.

use serde::{Deserialize, Serialize};

/// 2 years.
pub const EXPIRATION_WINDOW_DAYS: i64 = 730;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpirationStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ALERTA")]
    Alert,
    #[serde(rename = "BLOQUEIO")]
    Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpirationCheck {
    pub status: ExpirationStatus,
    #[serde(rename = "data_vencimento")]
    pub expiration_date: Option<String>,
    #[serde(rename = "dias_ate_vencimento")]
    pub days_to_expiration: Option<i64>,
    #[serde(rename = "dentro_prazo_2anos")]
    pub within_two_years: bool,
    #[serde(rename = "alerta")]
    pub alert: Option<String>,
    #[serde(rename = "acao_requerida")]
    pub required_action: Option<String>,
}

impl ExpirationCheck {
    pub fn blocks_renewal(&self) -> bool {
        self.status == ExpirationStatus::Block
    }
}

/// An absent or empty date blocks. A present date without a computed
/// day count is an inconsistent record and blocks as well; governance
/// checks fail closed.
pub fn classify_expiration(
    expiration_date: Option<&str>,
    days_to_expiration: Option<i64>,
) -> ExpirationCheck {
    let date = expiration_date.filter(|date| !date.is_empty());

    let (date, days) = match (date, days_to_expiration) {
        (Some(date), Some(days)) => (date, days),
        _ => {
            return ExpirationCheck {
                status: ExpirationStatus::Block,
                expiration_date: None,
                days_to_expiration: None,
                within_two_years: false,
                alert: Some(
                    "Data de vencimento não disponível no OneTrust. Cadastro obrigatório."
                        .to_string(),
                ),
                required_action: Some(
                    "Atualizar OneTrust com data de vencimento do contrato".to_string(),
                ),
            }
        }
    };

    if days > EXPIRATION_WINDOW_DAYS {
        return ExpirationCheck {
            status: ExpirationStatus::Alert,
            expiration_date: Some(date.to_string()),
            days_to_expiration: Some(days),
            within_two_years: false,
            alert: Some(format!(
                "Contrato vence em {days} dias (>2 anos). Revisar necessidade de parecer."
            )),
            required_action: Some("Verificar se renovação antecipada é necessária".to_string()),
        };
    }

    ExpirationCheck {
        status: ExpirationStatus::Ok,
        expiration_date: Some(date.to_string()),
        days_to_expiration: Some(days),
        within_two_years: true,
        alert: None,
        required_action: None,
    }
}
