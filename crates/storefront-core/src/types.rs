//! # Domain Types
//!
//! Core domain types used throughout the storefront cart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add_item    ┌─────────────────┐                 │
//! │  │  ItemCandidate  │ ────────────► │    LineItem     │                 │
//! │  │  ─────────────  │               │  ─────────────  │                 │
//! │  │  id             │               │  id             │                 │
//! │  │  title          │               │  title          │                 │
//! │  │  price          │               │  price          │                 │
//! │  │  ...opaque      │               │  quantity 1..=3 │                 │
//! │  └─────────────────┘               │  ...opaque      │                 │
//! │                                    └─────────────────┘                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CartLimits    │   │   AddOptions    │   │  UpdateOptions  │       │
//! │  │  unique: 8      │   │  bypass unique  │   │  allow overflow │       │
//! │  │  quantity: 3    │   │  limit          │   │  of item cap    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Opaque Fields
//! Catalog records carry image, category, description and rating. The cart
//! never inspects them but must hand them back unchanged, so both
//! `ItemCandidate` and `LineItem` keep them in a flattened JSON map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::money::Money;
use crate::{MAX_QUANTITY_PER_ITEM, MAX_UNIQUE_ITEMS};

/// Keys owned by the cart itself; never stored among the opaque fields.
pub(crate) const RESERVED_KEYS: [&str; 4] = ["id", "title", "price", "quantity"];

// =============================================================================
// Item Candidate
// =============================================================================

/// A product offered to the cart, before it has a quantity.
///
/// Mirrors the product identifier, title and price from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCandidate {
    /// Product identifier from the catalog.
    pub id: i64,

    /// Display title.
    pub title: String,

    /// Unit price in major currency units.
    pub price: f64,

    /// Descriptive fields carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemCandidate {
    /// Creates a candidate with no opaque fields.
    pub fn new(id: i64, title: impl Into<String>, price: f64) -> Self {
        ItemCandidate {
            id,
            title: title.into(),
            price,
            extra: Map::new(),
        }
    }

    /// Attaches an opaque field (image, category, ...).
    ///
    /// Reserved keys (`id`, `title`, `price`, `quantity`) are ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.extra.insert(key, value.into());
        }
        self
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product held in the cart.
///
/// ## Invariants (enforced by the cart and the validation gate)
/// - `title` is non-empty
/// - `price` is finite and > 0
/// - `1 <= quantity <= max_quantity_per_item`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product identifier, unique within the cart.
    #[ts(type = "number")]
    pub id: i64,

    /// Display title at the time of adding.
    pub title: String,

    /// Unit price in major currency units, as the catalog reported it.
    pub price: f64,

    /// Units of this product in the cart.
    pub quantity: u32,

    /// Descriptive fields carried through untouched.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    /// Creates a new line item with quantity 1 from a candidate.
    pub fn from_candidate(candidate: &ItemCandidate) -> Self {
        let mut extra = candidate.extra.clone();
        for key in RESERVED_KEYS {
            extra.remove(key);
        }

        LineItem {
            id: candidate.id,
            title: candidate.title.clone(),
            price: candidate.price,
            quantity: 1,
            extra,
        }
    }

    /// Returns the unit price in cents. Validated prices are whole cents, so
    /// the rounding here is exact.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_major(self.price)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Limits & Options
// =============================================================================

/// The two hard limits of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLimits {
    /// Maximum number of distinct products.
    pub max_unique_items: usize,

    /// Maximum quantity of any single product.
    pub max_quantity_per_item: u32,
}

impl CartLimits {
    /// Creates custom limits.
    pub const fn new(max_unique_items: usize, max_quantity_per_item: u32) -> Self {
        CartLimits {
            max_unique_items,
            max_quantity_per_item,
        }
    }
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits::new(MAX_UNIQUE_ITEMS, MAX_QUANTITY_PER_ITEM)
    }
}

/// Options for adding an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Skip the unique-item limit check. Reserved for administrative and
    /// test paths; the per-item cap still applies.
    pub allow_duplicate_bypass: bool,
}

impl AddOptions {
    /// Options that skip the unique-item limit.
    pub const fn bypass_unique_limit() -> Self {
        AddOptions {
            allow_duplicate_bypass: true,
        }
    }
}

/// Options for setting an item's quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Do not clamp the quantity to the per-item cap.
    pub allow_overflow: bool,
}

impl UpdateOptions {
    /// Options that skip the per-item clamp.
    pub const fn overflow() -> Self {
        UpdateOptions {
            allow_overflow: true,
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// What a successful add did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Added,
    /// An existing line item went up by one unit.
    Incremented { quantity: u32 },
}

/// What a quantity update did to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityOutcome {
    /// The line item now has this quantity.
    Updated { quantity: u32 },
    /// The effective quantity was zero; the line item was removed.
    Removed(LineItem),
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for display layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products in the cart.
    pub item_count: usize,

    /// Sum of all quantities.
    pub total_quantity: u32,

    /// Sum of line totals in cents.
    #[ts(type = "number")]
    pub total_cents: i64,
}

impl CartTotals {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_item_from_candidate() {
        let candidate = ItemCandidate::new(7, "Backpack", 109.95)
            .with_field("category", "men's clothing")
            .with_field("quantity", 5);

        let item = LineItem::from_candidate(&candidate);

        assert_eq!(item.id, 7);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.extra.get("category"), Some(&json!("men's clothing")));
        assert!(!item.extra.contains_key("quantity"));
    }

    #[test]
    fn test_line_total() {
        let mut item = LineItem::from_candidate(&ItemCandidate::new(1, "Ring", 10.99));
        item.quantity = 3;
        assert_eq!(item.line_total(), Money::from_cents(3297));
    }

    #[test]
    fn test_line_item_serializes_flat() {
        let candidate = ItemCandidate::new(1, "Ring", 9.5).with_field("image", "ring.jpg");
        let item = LineItem::from_candidate(&candidate);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "title": "Ring", "price": 9.5, "quantity": 1, "image": "ring.jpg"})
        );

        let back: LineItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_default_limits() {
        let limits = CartLimits::default();
        assert_eq!(limits.max_unique_items, 8);
        assert_eq!(limits.max_quantity_per_item, 3);
    }

    #[test]
    fn test_default_options() {
        assert!(!AddOptions::default().allow_duplicate_bypass);
        assert!(!UpdateOptions::default().allow_overflow);
        assert!(AddOptions::bypass_unique_limit().allow_duplicate_bypass);
        assert!(UpdateOptions::overflow().allow_overflow);
    }
}
