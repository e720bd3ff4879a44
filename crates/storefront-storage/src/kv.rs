//! # Key-Value Store
//!
//! The byte-level store the cart is persisted into, and its in-memory
//! backend.
//!
//! ## Availability Probe
//! ```text
//! probe()
//!   │
//!   ├── set("__storage_probe__", b"probe")  ── fails? → unavailable
//!   │
//!   └── remove("__storage_probe__")         ── fails? → unavailable
//! ```
//! Callers probe before reading or writing so that a missing or read-only
//! store shows up as a boolean, not as an error halfway through a save.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{StorageError, StorageResult};

/// Sentinel key written and removed by [`KeyValueStore::probe`].
pub const PROBE_KEY: &str = "__storage_probe__";

/// A key-value byte store addressed by string keys.
pub trait KeyValueStore {
    /// Reads a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Deletes a value. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Checks that the store accepts writes by writing then removing a
    /// sentinel key.
    fn probe(&self) -> bool {
        self.set(PROBE_KEY, b"probe").is_ok() && self.remove(PROBE_KEY).is_ok()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn probe(&self) -> bool {
        (**self).probe()
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory key-value store.
///
/// Clones share the same map and the same availability switch, so a test can
/// keep a handle to the store it gave away and inspect or sabotage it.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    available: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Creates an empty, available store.
    pub fn new() -> Self {
        MemoryStore {
            entries: Arc::new(Mutex::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Creates a store that rejects every operation, like a browser with
    /// storage disabled.
    pub fn unavailable() -> Self {
        let store = MemoryStore::new();
        store.set_available(false);
        store
    }

    /// Turns the store on or off for every clone.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored keys. Fails like any other read while the store is
    /// disabled.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Checks if nothing is stored.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store disabled".to_string()));
        }

        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryStore::new();

        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));

        store.remove("cart").unwrap();
        store.remove("cart").unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("cart", b"[1]").unwrap();
        assert_eq!(handle.get("cart").unwrap(), Some(b"[1]".to_vec()));
    }

    #[test]
    fn test_probe_leaves_no_sentinel() {
        let store = MemoryStore::new();
        assert!(store.probe());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_unavailable_store() {
        let store = MemoryStore::unavailable();

        assert!(!store.probe());
        assert!(matches!(store.get("cart"), Err(StorageError::Unavailable(_))));
        assert!(store.set("cart", b"[]").is_err());
        assert!(matches!(store.len(), Err(StorageError::Unavailable(_))));
        assert!(store.is_empty().is_err());

        store.set_available(true);
        assert!(store.probe());
        assert_eq!(store.len().unwrap(), 0);
    }
}
