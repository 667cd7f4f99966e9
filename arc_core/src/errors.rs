//! # Error Types
//!
//! Structured error types for arc_core. Every failure carries enough context
//! (field name, offending value, grid cell) to tell the caller exactly which
//! parameter to fix, whether that caller is a person or a script reading JSON.
//!
//! ## Example
//!
//! ```rust
//! use arc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_gap(gap_mm: f64) -> CalcResult<()> {
//!     if gap_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "gap_mm",
//!             gap_mm.to_string(),
//!             "Electrode gap must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_gap(25.0).is_ok());
//! assert!(validate_gap(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for arc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for hazard calculations and study files.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A configuration value is outside the model's domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An intermediate quantity left the log domain during evaluation.
    ///
    /// Raised for the first offending cell; the whole run is abandoned.
    #[error("Domain error in {quantity} at cell ({row}, {col}): {value}")]
    DomainError {
        quantity: String,
        row: usize,
        col: usize,
        value: String,
    },

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

    /// Study file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DomainError for grid cell `(row, col)`
    pub fn domain_error(quantity: impl Into<String>, row: usize, col: usize, value: f64) -> Self {
        CalcError::DomainError {
            quantity: quantity.into(),
            row,
            col,
            value: value.to_string(),
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

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("gap_mm", "-5", "Electrode gap must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::domain_error("energy", 1, 2, f64::NAN).error_code(), "DOMAIN_ERROR");
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(CalcError::file_error("read", "x.afs", "missing").error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_domain_error_message() {
        let e = CalcError::domain_error("arcing current", 3, 7, -1.0);
        assert_eq!(e.to_string(), "Domain error in arcing current at cell (3, 7): -1");
    }
}
