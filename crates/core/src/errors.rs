use thiserror::Error;

/// Failures the caller can correct by fixing the submitted data.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("campos obrigatórios ausentes: {}", fields.join(", "))]
    MissingRequiredFields { fields: Vec<&'static str> },
    #[error("CNPJ inválido após normalização: {raw}")]
    InvalidTaxId { raw: String },
}

impl DomainError {
    /// Wire-level error code, matched on by callers instead of catching
    /// exceptions.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredFields { .. } => "CAMPOS_OBRIGATORIOS_AUSENTES",
            Self::InvalidTaxId { .. } => "CNPJ_INVALIDO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DomainError;

    #[test]
    fn missing_fields_message_lists_fields_in_order() {
        let error =
            DomainError::MissingRequiredFields { fields: vec!["cnpj", "justificativa"] };

        assert_eq!(error.to_string(), "campos obrigatórios ausentes: cnpj, justificativa");
        assert_eq!(error.code(), "CAMPOS_OBRIGATORIOS_AUSENTES");
    }
}
