//! Error types for the EMI engine and its input boundary

use thiserror::Error;

/// Every fallible library operation returns this error.
#[derive(Debug, Error)]
pub enum EmiError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Not a number: {field} received {raw:?}")]
    NotANumber { field: String, raw: String },

    #[error("Loan duration of zero months has no installments")]
    ZeroDuration,

    #[error("Non-finite result in {context}")]
    NonFiniteResult { context: String },

    #[error("Preference storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl EmiError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        EmiError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for EmiError {
    fn from(e: std::io::Error) -> Self {
        EmiError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for EmiError {
    fn from(e: serde_json::Error) -> Self {
        EmiError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for EmiError {
    fn from(e: csv::Error) -> Self {
        EmiError::Csv(e.to_string())
    }
}

pub type EmiResult<T> = Result<T, EmiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EmiError::invalid("principal", "must be positive");
        assert_eq!(err.to_string(), "Invalid input: principal - must be positive");

        let err = EmiError::NotANumber {
            field: "Loan Amount".into(),
            raw: "abc".into(),
        };
        assert_eq!(err.to_string(), "Not a number: Loan Amount received \"abc\"");
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(EmiError::from(io), EmiError::Storage(_)));
    }
}
