//! # Validation Module
//!
//! The validation gate: nothing reaches the cart without passing here.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Structure (untyped JSON)                                     │
//! │  ├── parse_candidate: object? id integer? title string? price number?  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Candidate rules                                              │
//! │  ├── validate_candidate: title non-empty, price finite and > 0         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Item integrity (persisted payloads)                          │
//! │  ├── validate_line_item: title, price, quantity at least 1             │
//! │  └── validate_cart_items: every item valid, unique ids                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use storefront_core::validation::parse_candidate;
//!
//! assert!(parse_candidate(&json!({"id": 1, "title": "T", "price": 3.5})).is_ok());
//! assert!(parse_candidate(&json!({"id": 1, "title": "T", "price": -5})).is_err());
//! assert!(parse_candidate(&json!(null)).is_err());
//! ```

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{ItemCandidate, LineItem, RESERVED_KEYS};
use crate::MAX_UNIT_PRICE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line item title.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be strictly greater than zero (no free or negative items)
/// - Must not exceed [`MAX_UNIT_PRICE`]
/// - Must be a whole number of cents, so cart totals are exact
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price;
///
/// assert!(validate_price(10.99).is_ok());
/// assert!(validate_price(0.0).is_err());
/// assert!(validate_price(-5.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// assert!(validate_price(0.004).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::WrongType {
            field: "price".to_string(),
            expected: "a finite number".to_string(),
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE as i64,
        });
    }

    // Absorbs the binary representation error of decimal prices such as 22.3
    // up to MAX_UNIT_PRICE.
    let cents = price * 100.0;
    if (cents - cents.round()).abs() > 1e-4 {
        return Err(ValidationError::FractionalCents {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stored line item quantity.
///
/// Only zero is rejected. The per-item cap is a policy on adds and updates,
/// and an overflow update may legitimately have stored more.
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Candidate Validators
// =============================================================================

/// Validates a typed candidate.
pub fn validate_candidate(candidate: &ItemCandidate) -> ValidationResult<()> {
    validate_title(&candidate.title)?;
    validate_price(candidate.price)?;
    Ok(())
}

/// Parses and validates an untyped candidate.
///
/// ## Rules
/// - Must be a JSON object (`null`, arrays and scalars are rejected)
/// - `id` must be an integer number
/// - `title` must be a non-empty string
/// - `price` must be a number greater than zero
///
/// Any other keys are kept as opaque fields, except `quantity`, which the
/// cart assigns itself.
pub fn parse_candidate(value: &Value) -> ValidationResult<ItemCandidate> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let id = match object.get("id") {
        None | Some(Value::Null) => return Err(required("id")),
        Some(id) => id.as_i64().ok_or_else(|| wrong_type("id", "an integer"))?,
    };

    let title = match object.get("title") {
        None | Some(Value::Null) => return Err(required("title")),
        Some(title) => title.as_str().ok_or_else(|| wrong_type("title", "a string"))?,
    };

    let price = match object.get("price") {
        None | Some(Value::Null) => return Err(required("price")),
        Some(price) => price.as_f64().ok_or_else(|| wrong_type("price", "a number"))?,
    };

    let extra = object
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let candidate = ItemCandidate {
        id,
        title: title.to_string(),
        price,
        extra,
    };
    validate_candidate(&candidate)?;

    Ok(candidate)
}

impl TryFrom<&Value> for ItemCandidate {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        parse_candidate(value)
    }
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a single stored line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_title(&item.title)?;
    validate_price(item.price)?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validates a whole sequence of line items, as read back from storage.
///
/// ## Rules
/// - Every item satisfies [`validate_line_item`]
/// - No two items share an id
///
/// The cart limits are not checked: carts grown with the unique-limit
/// bypass or with overflow quantities must survive a reload.
pub fn validate_cart_items(items: &[LineItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_line_item(item)?;

        if !seen.insert(item.id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: item.id.to_string(),
            });
        }
    }

    Ok(())
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn wrong_type(field: &str, expected: &str) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected: expected.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: i64, quantity: u32) -> LineItem {
        let mut item = LineItem::from_candidate(&ItemCandidate::new(id, "Item", 5.0));
        item.quantity = quantity;
        item
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Mens Casual Slim Fit").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(109.95).is_ok());
        assert!(validate_price(22.3).is_ok());
        assert!(validate_price(999.99).is_ok());
        assert!(validate_price(MAX_UNIT_PRICE).is_ok());
        assert!(validate_price(999_999_999.99).is_ok());

        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-5.0).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_price_rejects_huge_amounts() {
        assert!(matches!(
            validate_price(5.0e16),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(MAX_UNIT_PRICE + 1.0).is_err());
    }

    #[test]
    fn test_validate_price_rejects_fractions_of_a_cent() {
        assert_eq!(
            validate_price(0.004),
            Err(ValidationError::FractionalCents {
                field: "price".to_string()
            })
        );
        assert!(validate_price(10.995).is_err());
        assert!(validate_price(0.001).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(3).is_ok());
        assert!(validate_quantity(u32::MAX).is_ok());

        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_parse_candidate_valid() {
        let candidate = parse_candidate(&json!({
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "quantity": 1,
            "category": "men's clothing"
        }))
        .unwrap();

        assert_eq!(candidate.id, 3);
        assert_eq!(candidate.title, "Mens Cotton Jacket");
        assert_eq!(candidate.extra.get("category"), Some(&json!("men's clothing")));
        assert!(!candidate.extra.contains_key("quantity"));
    }

    #[test]
    fn test_parse_candidate_rejects_non_objects() {
        assert_eq!(parse_candidate(&json!(null)), Err(ValidationError::NotAnObject));
        assert_eq!(parse_candidate(&json!([1, 2])), Err(ValidationError::NotAnObject));
        assert_eq!(parse_candidate(&json!("item")), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn test_parse_candidate_rejects_missing_fields() {
        assert!(matches!(
            parse_candidate(&json!({"title": "T", "price": 1})),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_candidate(&json!({"id": 1, "price": 1})),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_candidate(&json!({"id": 1, "title": "T", "price": null})),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_candidate_rejects_wrong_types() {
        assert!(matches!(
            parse_candidate(&json!({"id": "1", "title": "T", "price": 1})),
            Err(ValidationError::WrongType { .. })
        ));
        assert!(matches!(
            parse_candidate(&json!({"id": 1.5, "title": "T", "price": 1})),
            Err(ValidationError::WrongType { .. })
        ));
        assert!(matches!(
            parse_candidate(&json!({"id": 1, "title": 7, "price": 1})),
            Err(ValidationError::WrongType { .. })
        ));
        assert!(matches!(
            parse_candidate(&json!({"id": 1, "title": "T", "price": "9.99"})),
            Err(ValidationError::WrongType { .. })
        ));
    }

    #[test]
    fn test_parse_candidate_rejects_bad_values() {
        assert!(matches!(
            parse_candidate(&json!({"id": 1, "title": "T", "price": -5})),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_candidate(&json!({"id": 1, "title": "T", "price": 0})),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_candidate(&json!({"id": 1, "title": "", "price": 2})),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_cart_items() {
        assert!(validate_cart_items(&[]).is_ok());
        assert!(validate_cart_items(&[item(1, 1), item(2, 3)]).is_ok());

        assert!(matches!(
            validate_cart_items(&[item(1, 1), item(1, 2)]),
            Err(ValidationError::Duplicate { .. })
        ));
        assert!(validate_cart_items(&[item(1, 0)]).is_err());

        let mut sub_cent = item(2, 1);
        sub_cent.price = 0.004;
        assert!(validate_cart_items(&[item(1, 1), sub_cent]).is_err());
    }

    #[test]
    fn test_validate_cart_items_ignores_cart_limits() {
        let nine: Vec<LineItem> = (1..=9).map(|id| item(id, 1)).collect();
        assert!(validate_cart_items(&nine).is_ok());
        assert!(validate_cart_items(&[item(1, 4), item(2, 3_000_000_000)]).is_ok());
    }
}
