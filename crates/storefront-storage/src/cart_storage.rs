//! # Cart Storage
//!
//! Persistence adapter for the cart: a JSON array of line items under one
//! fixed key.
//!
//! ## Persisted Layout
//! ```text
//! key:   "cart"
//! value: [{"id":1,"title":"...","price":10.99,"quantity":2,"image":"..."}, ...]
//! ```
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │    store unavailable ───────► warn, empty cart                          │
//! │    key absent ──────────────► empty cart                                │
//! │    not JSON / wrong shape ──► warn, empty cart                          │
//! │    malformed item / dup id ─► warn, empty cart                          │
//! │    ok ──────────────────────► items                                     │
//! │                                                                         │
//! │  save(items)                                                            │
//! │    store unavailable ───────► warn, false                               │
//! │    write fails ─────────────► warn, false                               │
//! │    ok ──────────────────────► true                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Neither operation ever returns an error to its caller; `try_load` and
//! `try_save` keep the reason for callers that want it.
//!
//! Loading does not apply the cart limits. A cart saved after a bypassed add
//! or an overflow update comes back as it was saved.

use storefront_core::validation::validate_cart_items;
use storefront_core::{CartLimits, LineItem, CART_STORAGE_KEY};
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::kv::KeyValueStore;

/// Reads and writes the cart through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CartStorage<S> {
    store: S,
    key: String,
    limits: CartLimits,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Creates an adapter using the default key and limits.
    pub fn new(store: S) -> Self {
        CartStorage {
            store,
            key: CART_STORAGE_KEY.to_string(),
            limits: CartLimits::default(),
        }
    }

    /// Uses a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the limits for carts restored from this storage.
    pub fn with_limits(mut self, limits: CartLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The limits for carts restored from this storage.
    pub fn limits(&self) -> CartLimits {
        self.limits
    }

    /// The key the cart lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Checks whether the store currently accepts writes.
    pub fn is_available(&self) -> bool {
        self.store.probe()
    }

    /// Loads the persisted cart, keeping the failure reason.
    ///
    /// `Ok(None)` means nothing has been saved yet.
    pub fn try_load(&self) -> StorageResult<Option<Vec<LineItem>>> {
        if !self.is_available() {
            return Err(StorageError::Unavailable(format!(
                "cannot read key '{}'",
                self.key
            )));
        }

        let Some(bytes) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        let items: Vec<LineItem> = serde_json::from_slice(&bytes)?;
        validate_cart_items(&items)?;

        Ok(Some(items))
    }

    /// Loads the persisted cart, falling back to an empty one on any failure.
    pub fn load(&self) -> Vec<LineItem> {
        match self.try_load() {
            Ok(Some(items)) => {
                debug!(key = %self.key, items = items.len(), "cart restored from storage");
                items
            }
            Ok(None) => {
                debug!(key = %self.key, "no stored cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not restore cart, starting empty");
                Vec::new()
            }
        }
    }

    /// Saves the cart, keeping the failure reason.
    pub fn try_save(&self, items: &[LineItem]) -> StorageResult<()> {
        if !self.is_available() {
            return Err(StorageError::Unavailable(format!(
                "cannot write key '{}'",
                self.key
            )));
        }

        let bytes = serde_json::to_vec(items)?;
        self.store.set(&self.key, &bytes)
    }

    /// Saves the cart. Returns `false` if the store is unavailable or the
    /// write failed.
    pub fn save(&self, items: &[LineItem]) -> bool {
        match self.try_save(items) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not persist cart");
                false
            }
        }
    }

    /// Removes the persisted cart.
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not remove stored cart");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
