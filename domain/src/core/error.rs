//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid payment schedule: {0}")]
    InvalidSchedule(String),

    #[error("Wizard has no steps")]
    EmptyWizard,
}

impl DomainError {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_display() {
        let error = DomainError::unknown("project type", "villa");
        assert_eq!(error.to_string(), "Unknown project type: villa");
    }

    #[test]
    fn test_invalid_amount_display() {
        let error = DomainError::InvalidAmount("abc".to_string());
        assert_eq!(error.to_string(), "Invalid amount: abc");
    }
}
