//! # Cart Commands
//!
//! Commands that read or change the persisted cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐   add / add-json   ┌──────────┐                          │
//! │  │  Empty   │───────────────────►│ In Cart  │◄──┐ update / remove      │
//! │  │  Cart    │   add-from-catalog │          │───┘                      │
//! │  └──────────┘                    └──────────┘                          │
//! │       ▲                               │                                 │
//! │       └─────────── empty ─────────────┘                                 │
//! │                                                                         │
//! │  Every change is saved to the data directory before the command exits. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use serde_json::Value;
use storefront_cart::CartService;
use storefront_core::validation::parse_candidate;
use storefront_core::{AddOptions, AddOutcome, ItemCandidate, UpdateOptions};
use storefront_storage::KeyValueStore;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Prints the cart contents and totals.
///
/// ## Output
/// ```text
/// Cart: 2 products, 3 units
///   #5     Naga Bracelet                      x2      $1390.00
///   #2     Slim Fit T-Shirt                   x1        $22.30
/// Total: $1412.30
/// ```
pub fn show<S: KeyValueStore>(
    cart: &CartService<S>,
    config: &AppConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    let items = cart.cart();
    if items.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    let totals = cart.totals();
    writeln!(
        out,
        "Cart: {} products, {} units",
        totals.item_count, totals.total_quantity
    )?;

    for item in &items {
        writeln!(
            out,
            "  #{:<5} {:<34} x{:<3} {:>12}",
            item.id,
            item.title,
            item.quantity,
            config.format_currency(item.line_total())
        )?;
    }

    writeln!(out, "Total: {}", config.format_currency(totals.total()))?;
    Ok(())
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Product not in cart: added with quantity 1
/// - Product already in cart: quantity increases by one
/// - Cart full or product at its cap: rejected with the limit in the message
pub fn add<S: KeyValueStore>(
    cart: &mut CartService<S>,
    candidate: &ItemCandidate,
    bypass_limit: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    debug!(id = candidate.id, bypass_limit, "add command");

    let options = if bypass_limit {
        AddOptions::bypass_unique_limit()
    } else {
        AddOptions::default()
    };

    match cart.try_add_item(candidate, options)? {
        AddOutcome::Added => writeln!(out, "{} added to cart", candidate.title.trim())?,
        AddOutcome::Incremented { quantity } => writeln!(
            out,
            "{} added to cart ({} in cart)",
            candidate.title.trim(),
            quantity
        )?,
    }

    report_persistence(cart, out)
}

/// Adds one unit of a product given as a raw JSON object.
pub fn add_json<S: KeyValueStore>(
    cart: &mut CartService<S>,
    raw: &str,
    bypass_limit: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    let value: Value = serde_json::from_str(raw)?;
    let candidate = parse_candidate(&value)?;
    add(cart, &candidate, bypass_limit, out)
}

/// Sets a product's quantity. Zero or less removes it.
pub fn update<S: KeyValueStore>(
    cart: &mut CartService<S>,
    id: i64,
    quantity: i64,
    allow_overflow: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    debug!(id, quantity, allow_overflow, "update command");

    let options = if allow_overflow {
        UpdateOptions::overflow()
    } else {
        UpdateOptions::default()
    };

    if !cart.update_quantity(id, quantity, options) {
        return Err(CliError::not_found("Product", id));
    }

    match cart.cart().iter().find(|item| item.id == id) {
        Some(item) => writeln!(out, "{} quantity set to {}", item.title, item.quantity)?,
        None => writeln!(out, "Product {} removed from cart", id)?,
    }

    report_persistence(cart, out)
}

/// Removes a product from the cart.
pub fn remove<S: KeyValueStore>(
    cart: &mut CartService<S>,
    id: i64,
    out: &mut impl Write,
) -> CliResult<()> {
    debug!(id, "remove command");

    if !cart.remove_item(id) {
        return Err(CliError::not_found("Product", id));
    }

    writeln!(out, "Product {} removed from cart", id)?;
    report_persistence(cart, out)
}

/// Removes every product from the cart.
pub fn empty<S: KeyValueStore>(cart: &mut CartService<S>, out: &mut impl Write) -> CliResult<()> {
    debug!("empty command");
    cart.empty_cart();
    writeln!(out, "Cart emptied")?;
    report_persistence(cart, out)
}

/// Prints the cart limits.
pub fn limits<S: KeyValueStore>(cart: &CartService<S>, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "Max unique products: {}", cart.max_unique_items_limit())?;
    writeln!(out, "Max units per product: {}", cart.max_quantity_limit())?;
    Ok(())
}

fn report_persistence<S: KeyValueStore>(
    cart: &CartService<S>,
    out: &mut impl Write,
) -> CliResult<()> {
    if !cart.is_persisted() {
        writeln!(out, "warning: the cart could not be saved")?;
    }
    Ok(())
}
