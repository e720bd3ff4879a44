//! # CLI Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  storefront add --id 3 ...                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, CliError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── StorageError::Io(..) ─────────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Cart Rejection? ─── CoreError::QuantityLimit ── CliError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: "error: Maximum 3 units per product"                           │
//! │  exit code: 1 (cart), 2 (input), 3 (storage), 4 (not found)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use storefront_storage::StorageError;
use thiserror::Error;

/// Error returned from CLI commands.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A cart limit rejected the change
    CartLimit,

    /// Input validation failed
    ValidationError,

    /// Reading or writing persisted data failed
    StorageError,

    /// Product not found in the cart or catalog
    NotFound,

    /// Writing command output failed
    Internal,
}

impl ErrorCode {
    /// Process exit code for this kind of failure.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::CartLimit => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::StorageError => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::Internal => 70,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: i64) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an error for an unreadable catalog file.
    pub fn catalog(path: &Path, reason: impl std::fmt::Display) -> Self {
        CliError::new(
            ErrorCode::StorageError,
            format!("Could not read catalog {}: {}", path.display(), reason),
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }
}

/// Converts cart rejections to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UniqueItemLimit { max } => CliError::new(
                ErrorCode::CartLimit,
                format!("Maximum {} unique products", max),
            ),
            CoreError::QuantityLimit { max, .. } => CliError::new(
                ErrorCode::CartLimit,
                format!("Maximum {} units per product", max),
            ),
            CoreError::ItemNotFound(id) => CliError::not_found("Product", id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(format!("Invalid product: {}", err))
    }
}

/// Converts storage errors to CLI errors.
impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "storage failure");
        CliError::new(ErrorCode::StorageError, format!("Storage failure: {}", err))
    }
}

/// Malformed JSON given on the command line.
impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::validation(format!("Invalid JSON: {}", err))
    }
}

/// Failure writing to stdout.
impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Internal, format!("Output failed: {}", err))
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_messages() {
        let err = CliError::from(CoreError::UniqueItemLimit { max: 8 });
        assert_eq!(err.code, ErrorCode::CartLimit);
        assert_eq!(err.to_string(), "Maximum 8 unique products");

        let err = CliError::from(CoreError::QuantityLimit { id: 4, max: 3 });
        assert_eq!(err.to_string(), "Maximum 3 units per product");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validation_and_not_found() {
        let err = CliError::from(CoreError::Validation(ValidationError::MustBePositive {
            field: "price".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("Invalid product"));

        let err = CliError::from(CoreError::ItemNotFound(42));
        assert_eq!(err.to_string(), "Product not found: 42");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_serializes_code() {
        let err = CliError::from(CoreError::UniqueItemLimit { max: 8 });
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CART_LIMIT");
        assert_eq!(json["message"], "Maximum 8 unique products");
    }
}
