//! # Storage Error Types
//!
//! Error types for key-value store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / ValidationError                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds categorization                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStorage::load / save ← Logged, then turned into a fallback        │
//! │                             (empty cart) or `false`                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

/// Key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store cannot be reached (disabled, missing, lock poisoned).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid JSON for a cart.
    #[error("Cart payload could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The payload parsed but breaks the cart invariants.
    #[error("Stored cart is corrupted: {0}")]
    Corrupted(#[from] ValidationError),
}

/// Convenience type alias for Results with StorageError.
pub type StorageResult<T> = Result<T, StorageError>;
