//! # Storefront CLI Entry Point
//!
//! ```text
//! $ storefront add --id 3 --title "Mens Cotton Jacket" --price 55.99
//! Mens Cotton Jacket added to cart
//! $ storefront show
//! Cart: 1 products, 1 units
//!   #3     Mens Cotton Jacket                 x1        $55.99
//! Total: $55.99
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    storefront_cli::run()
}
