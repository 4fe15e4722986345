//! # Error Module
//!
//! Core domain errors, defined with thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Validation failures on pure domain data, independent of any store.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown transfer mode: {0}")]
    UnknownMode(String),

    #[error("Unknown entry status: {0}")]
    UnknownStatus(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidAmount("amount must be positive: -5".to_string());
        assert_eq!(err.to_string(), "Invalid amount: amount must be positive: -5");

        let err = CoreError::UnknownMode("NEFT".to_string());
        assert_eq!(err.to_string(), "Unknown transfer mode: NEFT");
    }
}
