//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Cart policy rejections                         │
//! │  └── ValidationError  - Malformed candidates or payloads               │
//! │                                                                         │
//! │  storefront-storage errors (separate crate)                            │
//! │  └── StorageError     - Key-value store failures                       │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  CartService surfaces all of these as `false` or a fallback value;     │
//! │  the typed variants exist for callers that want the reason.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart policy errors.
///
/// Every variant is recoverable: the cart is left untouched when one is
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The cart already holds the maximum number of distinct products.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: 8 distinct products
    ///      │
    ///      ▼
    /// Add a 9th product
    ///      │
    ///      ▼
    /// UniqueItemLimit { max: 8 }
    ///      │
    ///      ▼
    /// UI shows: "Maximum 8 unique products"
    /// ```
    #[error("Cart cannot hold more than {max} unique products")]
    UniqueItemLimit { max: usize },

    /// The product is already at its per-item quantity cap.
    #[error("Product {id} is already at the maximum of {max} units")]
    QuantityLimit { id: i64, max: u32 },

    /// No line item with this id is in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the validation gate for candidates handed to the cart and for
/// payloads read back from storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The candidate is not a structured value (null, array, scalar).
    #[error("item must be an object")]
    NotAnObject,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A field has the wrong type.
    #[error("{field} must be {expected}")]
    WrongType { field: String, expected: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Amount is finer than the smallest currency unit.
    #[error("{field} cannot have fractions of a cent")]
    FractionalCents { field: String },

    /// Duplicate value (e.g., the same id twice in a persisted cart).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UniqueItemLimit { max: 8 };
        assert_eq!(err.to_string(), "Cart cannot hold more than 8 unique products");

        let err = CoreError::QuantityLimit { id: 4, max: 3 };
        assert_eq!(
            err.to_string(),
            "Product 4 is already at the maximum of 3 units"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::WrongType {
            field: "id".to_string(),
            expected: "an integer".to_string(),
        };
        assert_eq!(err.to_string(), "id must be an integer");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
