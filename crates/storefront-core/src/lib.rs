//! # storefront-core: Pure Business Logic for the Storefront Cart
//!
//! This crate holds the cart's business rules as pure, deterministic code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Cart Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (CLI / web bindings)                  │   │
//! │  │     Catalog ──► Add to cart ──► Cart view ──► Empty cart        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-cart (CartService)                      │   │
//! │  │     validate ──► apply limits ──► persist ──► notify            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌───────────────┐     │   │
//! │  │   │  types   │ │  money   │ │   cart   │ │  validation   │     │   │
//! │  │   │ LineItem │ │  Money   │ │   Cart   │ │  gate rules   │     │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └───────────────┘     │   │
//! │  │   ┌──────────┐ ┌──────────┐                                    │   │
//! │  │   │ observer │ │ catalog  │                                    │   │
//! │  │   │ registry │ │ products │                                    │   │
//! │  │   └──────────┘ └──────────┘                                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, candidates, limits and operation options
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart aggregate and its limit policy
//! - [`validation`] - The validation gate
//! - [`observer`] - Observer registry for committed mutations
//! - [`catalog`] - Catalog product records and category filtering
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{AddOptions, Cart, ItemCandidate, Money};
//!
//! let mut cart = Cart::new();
//! let shirt = ItemCandidate::new(1, "Slim Fit T-Shirt", 10.99);
//!
//! cart.add(&shirt, AddOptions::default()).unwrap();
//! cart.add(&shirt, AddOptions::default()).unwrap();
//! cart.add(&shirt, AddOptions::default()).unwrap();
//!
//! // Fourth unit is over the per-item cap
//! assert!(cart.add(&shirt, AddOptions::default()).is_err());
//! assert_eq!(cart.total(), Money::from_cents(3297));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod observer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{CatalogProduct, Rating};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use observer::{CartObserver, ObserverRegistry};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct products allowed in the cart at once.
pub const MAX_UNIQUE_ITEMS: usize = 8;

/// Maximum quantity of a single product in the cart.
///
/// ## Business Reason
/// Adding is modelled as a manual "add" tap; three units is the most a
/// single shopper may hold of one product.
pub const MAX_QUANTITY_PER_ITEM: u32 = 3;

/// Highest accepted unit price, in major currency units.
///
/// At this price a full cart at the default caps is still far inside i64
/// cents.
pub const MAX_UNIT_PRICE: f64 = 1_000_000_000.0;

/// Key under which the cart is persisted.
pub const CART_STORAGE_KEY: &str = "cart";
