//! # Cart Service
//!
//! The cart engine: every mutation runs validate → apply limits → persist →
//! notify, synchronously, before returning.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartService::add_item                                │
//! │                                                                         │
//! │  candidate                                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Validation gate ──── invalid ─────────────────────────────► false     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Cart limit policy ── unique cap / item cap ───────────────► false     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  CartStorage::save ── failure only recorded (is_persisted)             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ObserverRegistry::notify_all(snapshot)                                │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  true                                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The service owns the cart outright and is mutated through `&mut self`.
//! Callers get owned copies from [`CartService::cart`]; observers get a
//! shared borrow of a snapshot. Nothing outside can reach the live items.

use serde_json::Value;
use storefront_core::validation::parse_candidate;
use storefront_core::{
    AddOptions, AddOutcome, Cart, CartLimits, CartObserver, CartTotals, CoreResult, ItemCandidate,
    LineItem, Money, ObserverRegistry, QuantityOutcome, UpdateOptions,
};
use storefront_storage::{CartStorage, KeyValueStore};
use tracing::{debug, error, warn};

/// Cart engine over a key-value store.
#[derive(Debug)]
pub struct CartService<S> {
    cart: Cart,
    storage: CartStorage<S>,
    observers: ObserverRegistry,
    persisted: bool,
}

impl<S: KeyValueStore> CartService<S> {
    /// Creates a service with default limits, restoring any cart saved in
    /// `store`.
    pub fn new(store: S) -> Self {
        Self::from_storage(CartStorage::new(store))
    }

    /// Creates a service with custom limits.
    pub fn with_limits(store: S, limits: CartLimits) -> Self {
        Self::from_storage(CartStorage::new(store).with_limits(limits))
    }

    /// Creates a service from a configured storage adapter.
    ///
    /// An unavailable store or a corrupted payload yields an empty cart.
    pub fn from_storage(storage: CartStorage<S>) -> Self {
        let limits = storage.limits();
        let cart = Cart::from_items(storage.load(), limits).unwrap_or_else(|e| {
            warn!(error = %e, "stored cart rejected, starting empty");
            Cart::with_limits(limits)
        });

        debug!(items = cart.item_count(), "cart service ready");

        CartService {
            cart,
            storage,
            observers: ObserverRegistry::new(),
            persisted: true,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product, reporting why it was rejected.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for a malformed candidate
    /// - `CoreError::QuantityLimit` when the product is already at the cap
    /// - `CoreError::UniqueItemLimit` when the cart is full (unless bypassed)
    ///
    /// Nothing is persisted and no observer runs on error.
    pub fn try_add_item(
        &mut self,
        candidate: &ItemCandidate,
        options: AddOptions,
    ) -> CoreResult<AddOutcome> {
        let outcome = self.cart.add(candidate, options).map_err(|e| {
            debug!(id = candidate.id, reason = %e, "add rejected");
            e
        })?;

        debug!(id = candidate.id, ?outcome, "item added");
        self.commit();
        Ok(outcome)
    }

    /// Adds one unit of a product. Returns `false` if it was rejected.
    pub fn add_item(&mut self, candidate: &ItemCandidate, options: AddOptions) -> bool {
        self.try_add_item(candidate, options).is_ok()
    }

    /// Adds one unit of a product given as untyped JSON.
    ///
    /// The value must be an object with an integer `id`, a non-empty string
    /// `title` and a positive numeric `price`; anything else returns `false`.
    pub fn add_item_json(&mut self, candidate: &Value, options: AddOptions) -> bool {
        match parse_candidate(candidate) {
            Ok(candidate) => self.add_item(&candidate, options),
            Err(e) => {
                debug!(reason = %e, "add rejected by validation");
                false
            }
        }
    }

    /// Sets the quantity of a product in the cart.
    ///
    /// The quantity is clamped to the per-item cap (unless
    /// `options.allow_overflow`, which still clamps at `u32::MAX`) and
    /// floored at zero; zero removes the item. Returns `false` only when the
    /// product is not in the cart.
    pub fn update_quantity(&mut self, id: i64, quantity: i64, options: UpdateOptions) -> bool {
        match self.cart.update_quantity(id, quantity, options) {
            Ok(QuantityOutcome::Updated { quantity }) => {
                debug!(id, quantity, "quantity updated");
            }
            Ok(QuantityOutcome::Removed(_)) => {
                debug!(id, "quantity reached zero, item removed");
            }
            Err(e) => {
                debug!(id, reason = %e, "quantity update rejected");
                return false;
            }
        }

        self.commit();
        true
    }

    /// Removes a product. Persists and notifies only if it was in the cart.
    pub fn remove_item(&mut self, id: i64) -> bool {
        if self.cart.remove(id).is_none() {
            return false;
        }

        debug!(id, "item removed");
        self.commit();
        true
    }

    /// Empties the cart. Always persists and notifies, even if it was
    /// already empty.
    pub fn empty_cart(&mut self) {
        self.cart.clear();
        debug!("cart emptied");
        self.commit();
    }

    /// Registers an observer, called after every committed mutation.
    ///
    /// A panicking observer is isolated and logged, but the process panic
    /// hook still reports the panic (by default on stderr).
    pub fn register_observer(&mut self, observer: impl CartObserver + 'static) {
        self.observers.register(observer);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns a copy of the items in insertion order.
    pub fn cart(&self) -> Vec<LineItem> {
        self.cart.snapshot()
    }

    /// Σ price × quantity; zero for an empty cart.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.cart.item_count()
    }

    /// Sum of quantities across all products, saturating at `u32::MAX`.
    pub fn total_product_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// Item count, quantity and total in one value.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// The per-item quantity cap.
    pub fn max_quantity_limit(&self) -> u32 {
        self.cart.limits().max_quantity_per_item
    }

    /// The distinct-product cap.
    pub fn max_unique_items_limit(&self) -> usize {
        self.cart.limits().max_unique_items
    }

    /// Whether the most recent save succeeded.
    ///
    /// Mutations are never rolled back when persistence fails; this is how
    /// callers find out.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// The persistence adapter.
    pub fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    /// Persists, then notifies observers.
    fn commit(&mut self) {
        self.persisted = self.storage.save(self.cart.items());

        let snapshot = self.cart.snapshot();
        let failures = self.observers.notify_all(&snapshot);
        if failures > 0 {
            error!(failures, observers = self.observers.len(), "cart observers panicked");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
