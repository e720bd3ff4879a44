//! # storefront-storage: Persistence Layer for the Storefront Cart
//!
//! Best-effort durability of cart state across sessions, on top of a plain
//! key-value byte store (the browser's local storage, a directory on disk, or
//! memory in tests).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Persistence                            │
//! │                                                                         │
//! │  CartService::add_item / empty_cart / ...                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-storage (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌──────────────────────────────────────┐ │   │
//! │  │   │  CartStorage  │──►│ KeyValueStore (trait)                │ │   │
//! │  │   │  key "cart"   │   │  ├── MemoryStore  (tests, fallback)  │ │   │
//! │  │   │  load / save  │   │  └── FileStore    (one file per key) │ │   │
//! │  │   └───────────────┘   └──────────────────────────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`kv`] - The `KeyValueStore` trait and the in-memory backend
//! - [`file`] - On-disk backend
//! - [`cart_storage`] - The cart persistence adapter
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use storefront_core::{ItemCandidate, LineItem};
//! use storefront_storage::{CartStorage, MemoryStore};
//!
//! let storage = CartStorage::new(MemoryStore::new());
//! let items = vec![LineItem::from_candidate(&ItemCandidate::new(1, "Ring", 9.99))];
//!
//! assert!(storage.save(&items));
//! assert_eq!(storage.load(), items);
//! ```

pub mod cart_storage;
pub mod error;
pub mod file;
pub mod kv;

pub use cart_storage::CartStorage;
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore, PROBE_KEY};
