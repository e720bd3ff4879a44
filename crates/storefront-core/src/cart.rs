//! # Cart Aggregate
//!
//! The ordered collection of line items and the limit policy guarding it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation            Check                       Change                │
//! │  ─────────            ─────                       ──────                │
//! │                                                                         │
//! │  add (new id) ──────► unique cap (unless bypass) ► items.push(qty 1)   │
//! │                                                                         │
//! │  add (known id) ────► per-item cap (reject) ─────► items[i].qty += 1   │
//! │                                                                         │
//! │  update_quantity ───► clamp to 0..=cap ──────────► items[i].qty = n    │
//! │                       (0 removes the item)                              │
//! │                                                                         │
//! │  remove ────────────► id present? ───────────────► items.remove(i)     │
//! │                                                                         │
//! │  clear ─────────────► none ──────────────────────► items.clear()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Item Lifecycle
//! ```text
//! absent ──add──► present(1) ──add──► present(2..=3) ──remove / qty 0──► absent
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    AddOptions, AddOutcome, CartLimits, CartTotals, ItemCandidate, LineItem, QuantityOutcome,
    UpdateOptions,
};
use crate::validation::{validate_candidate, validate_cart_items};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - At most `limits.max_unique_items` items, unless added with the bypass
/// - Every quantity is in `1..=limits.max_quantity_per_item`, unless set with
///   the overflow option
/// - Insertion order is preserved
///
/// Items are only reachable through shared borrows or owned copies.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    limits: CartLimits,
}

impl Cart {
    /// Creates a new empty cart with the default limits.
    pub fn new() -> Self {
        Cart::with_limits(CartLimits::default())
    }

    /// Creates a new empty cart with custom limits.
    pub fn with_limits(limits: CartLimits) -> Self {
        Cart {
            items: Vec::new(),
            limits,
        }
    }

    /// Rebuilds a cart from previously persisted items.
    ///
    /// Every item must be well formed and ids must be unique; a single bad
    /// item rejects the lot. The limits are not applied to restored items,
    /// so a cart grown past them with the bypass options reloads intact.
    pub fn from_items(items: Vec<LineItem>, limits: CartLimits) -> Result<Self, ValidationError> {
        validate_cart_items(&items)?;

        Ok(Cart { items, limits })
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Invalid candidate: `CoreError::Validation`
    /// - Known id at the per-item cap: `CoreError::QuantityLimit` (no clamping)
    /// - Known id below the cap: quantity + 1
    /// - New id with the cart full: `CoreError::UniqueItemLimit`, unless
    ///   `options.allow_duplicate_bypass`
    /// - New id otherwise: appended with quantity 1
    ///
    /// The cart is untouched on every error.
    pub fn add(&mut self, candidate: &ItemCandidate, options: AddOptions) -> CoreResult<AddOutcome> {
        validate_candidate(candidate)?;

        let max_quantity = self.limits.max_quantity_per_item;
        if let Some(item) = self.items.iter_mut().find(|i| i.id == candidate.id) {
            if item.quantity >= max_quantity {
                return Err(CoreError::QuantityLimit {
                    id: candidate.id,
                    max: max_quantity,
                });
            }

            item.quantity += 1;
            return Ok(AddOutcome::Incremented {
                quantity: item.quantity,
            });
        }

        if !options.allow_duplicate_bypass && self.items.len() >= self.limits.max_unique_items {
            return Err(CoreError::UniqueItemLimit {
                max: self.limits.max_unique_items,
            });
        }

        self.items.push(LineItem::from_candidate(candidate));
        Ok(AddOutcome::Added)
    }

    /// Sets the quantity of an item in the cart.
    ///
    /// ## Behavior
    /// - Product not found: `CoreError::ItemNotFound`
    /// - Quantity is clamped to the per-item cap unless
    ///   `options.allow_overflow`, and never goes below zero
    /// - Overflow quantities above `u32::MAX` are clamped to `u32::MAX`
    /// - An effective quantity of 0 removes the item
    pub fn update_quantity(
        &mut self,
        id: i64,
        quantity: i64,
        options: UpdateOptions,
    ) -> CoreResult<QuantityOutcome> {
        let index = self.position(id).ok_or(CoreError::ItemNotFound(id))?;

        let requested = if options.allow_overflow {
            quantity
        } else {
            quantity.min(i64::from(self.limits.max_quantity_per_item))
        };
        let effective = u32::try_from(requested.max(0)).unwrap_or(u32::MAX);

        if effective == 0 {
            return Ok(QuantityOutcome::Removed(self.items.remove(index)));
        }

        self.items[index].quantity = effective;
        Ok(QuantityOutcome::Updated {
            quantity: effective,
        })
    }

    /// Removes an item from the cart by id, returning it if it was present.
    pub fn remove(&mut self, id: i64) -> Option<LineItem> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Borrows the items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns an owned copy of the items; changing it never affects the cart.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Looks up a single item.
    pub fn get(&self, id: i64) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Checks if a product is in the cart.
    pub fn contains(&self, id: i64) -> bool {
        self.position(id).is_some()
    }

    /// Returns the limits this cart enforces.
    pub fn limits(&self) -> CartLimits {
        self.limits
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items, saturating at `u32::MAX`.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, i| total.saturating_add(i.quantity))
    }

    /// Calculates the total (Σ unit price × quantity), saturating at the
    /// i64 cents bounds.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks whether another distinct product would be accepted.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limits.max_unique_items
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
