//! # storefront-cart: The Cart Engine
//!
//! [`CartService`] is what front ends hold: an explicitly constructed cart
//! engine over any [`KeyValueStore`](storefront_storage::KeyValueStore),
//! passed to whoever needs it rather than living in a global.
//!
//! ## Usage
//!
//! ```rust
//! use storefront_cart::CartService;
//! use storefront_core::{AddOptions, ItemCandidate, LineItem};
//! use storefront_storage::MemoryStore;
//!
//! let mut cart = CartService::new(MemoryStore::new());
//! cart.register_observer(|items: &[LineItem]| println!("{} products in cart", items.len()));
//!
//! let jacket = ItemCandidate::new(3, "Mens Cotton Jacket", 55.99);
//! assert!(cart.add_item(&jacket, AddOptions::default()));
//! assert_eq!(cart.item_count(), 1);
//! ```

pub mod service;

pub use service::CartService;
