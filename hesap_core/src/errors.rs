//! # Error Types
//!
//! Structured error types for hesap_core. Validation failures never show up
//! here during normal use: an invalid input set simply evaluates to
//! [`CalculationOutcome::Invalid`](crate::gate::CalculationOutcome). The
//! variants below cover the cases a caller has to react to.
//!
//! ## Example
//!
//! ```rust
//! use hesap_core::catalog;
//! use hesap_core::errors::CalcError;
//!
//! let err = catalog::get("kiris").unwrap_err();
//! assert_eq!(err.error_code(), "NOT_FOUND");
//! assert!(matches!(err, CalcError::NotFound { .. }));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for hesap_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The calculator's precondition does not hold for the current inputs
    #[error("Invalid input for '{calculator}': {reason}")]
    InvalidInput { calculator: String, reason: String },

    /// A form update named a key that is not part of the calculator's schema
    #[error("Unknown field '{field}' for calculator '{calculator}'")]
    UnknownField { calculator: String, field: String },

    /// Calculator or report lookup failed
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// The identity collaborator reports no signed-in user
    #[error("Not authenticated: {action} requires a signed-in user")]
    NotAuthenticated { action: String },

    /// Document serialization could not complete
    #[error("Render failure for '{document}': {reason}")]
    RenderFailure { document: String, reason: String },

    /// Settings could not be read or parsed
    #[error("Config error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(calculator: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            calculator: calculator.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownField error
    pub fn unknown_field(calculator: impl Into<String>, field: impl Into<String>) -> Self {
        CalcError::UnknownField {
            calculator: calculator.into(),
            field: field.into(),
        }
    }

    /// Create a NotFound error for a calculator id
    pub fn calculator_not_found(id: impl Into<String>) -> Self {
        CalcError::NotFound {
            kind: "Calculator".to_string(),
            id: id.into(),
        }
    }

    /// Create a NotFound error for a report id
    pub fn report_not_found(id: impl Into<String>) -> Self {
        CalcError::NotFound {
            kind: "Report".to_string(),
            id: id.into(),
        }
    }

    /// Create a NotAuthenticated error
    pub fn not_authenticated(action: impl Into<String>) -> Self {
        CalcError::NotAuthenticated {
            action: action.into(),
        }
    }

    /// Create a RenderFailure error
    pub fn render_failure(document: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::RenderFailure {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the UI should turn this into local state (no result, no save)
    /// instead of failing the page.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::UnknownField { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownField { .. } => "UNKNOWN_FIELD",
            CalcError::NotFound { .. } => "NOT_FOUND",
            CalcError::NotAuthenticated { .. } => "NOT_AUTHENTICATED",
            CalcError::RenderFailure { .. } => "RENDER_FAILURE",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::render_failure("basınç-hesaplama-rapor.pdf", "font missing");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"RenderFailure\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::calculator_not_found("x").error_code(), "NOT_FOUND");
        assert_eq!(CalcError::report_not_found("1-0").error_code(), "NOT_FOUND");
        assert_eq!(CalcError::unknown_field("basinc", "Z").error_code(), "UNKNOWN_FIELD");
        assert_eq!(CalcError::not_authenticated("save").error_code(), "NOT_AUTHENTICATED");
        assert_eq!(CalcError::internal("export task panicked").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_recoverable() {
        assert!(CalcError::invalid_input("basinc", "A must be > 0").is_recoverable());
        assert!(!CalcError::render_failure("doc", "oom").is_recoverable());
        assert!(!CalcError::calculator_not_found("x").is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = CalcError::calculator_not_found("kiris");
        assert_eq!(err.to_string(), "Calculator not found: kiris");
    }
}
