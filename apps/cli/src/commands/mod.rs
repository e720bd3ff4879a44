//! # CLI Commands Module
//!
//! All subcommands of the `storefront` binary.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (subcommand enum & dispatch)
//! ├── cart.rs     ◄─── show, add, add-json, update, remove, empty, limits
//! └── catalog.rs  ◄─── catalog, categories, add-from-catalog
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ storefront update 3 2                                                │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  Command::Update { id: 3, quantity: 2, allow_overflow: false }          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  execute() ──► open FileStore ──► CartService (restores saved cart)     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  cart::update(&mut service, 3, 2, false, &mut stdout)                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<(), CliError> ──► exit code                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog listing never touches the cart, so it works even when the data
//! directory is unwritable.

pub mod cart;
pub mod catalog;

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;
use storefront_cart::CartService;
use storefront_core::catalog::ALL_CATEGORIES;
use storefront_core::{ItemCandidate, LineItem};
use storefront_storage::{CartStorage, FileStore};
use tracing::info;

use crate::config::AppConfig;
use crate::error::CliResult;

/// Subcommands of the `storefront` binary.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the cart contents and total
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: i64,

        /// Product title
        #[arg(long)]
        title: String,

        /// Unit price
        #[arg(long, allow_negative_numbers = true)]
        price: f64,

        /// Product category
        #[arg(long)]
        category: Option<String>,

        /// Product image URL
        #[arg(long)]
        image: Option<String>,

        /// Ignore the unique-product limit
        #[arg(long)]
        bypass_limit: bool,
    },

    /// Add one unit of a product given as a JSON object
    AddJson {
        /// e.g. '{"id": 3, "title": "Jacket", "price": 55.99}'
        json: String,

        /// Ignore the unique-product limit
        #[arg(long)]
        bypass_limit: bool,
    },

    /// Add one unit of a product from a catalog file
    AddFromCatalog {
        /// Catalog JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Catalog product id
        #[arg(long)]
        id: i64,
    },

    /// Set a product's quantity (0 removes it)
    Update {
        /// Product id
        id: i64,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Do not clamp to the per-product limit
        #[arg(long)]
        allow_overflow: bool,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: i64,
    },

    /// Remove every product from the cart
    Empty,

    /// List catalog products
    Catalog {
        /// Catalog JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Only list this category
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },

    /// List catalog categories
    Categories {
        /// Catalog JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,
    },

    /// Show the cart limits
    Limits,
}

/// Runs one subcommand, writing its output to `out`.
pub fn execute(command: Command, config: &AppConfig, out: &mut impl Write) -> CliResult<()> {
    match command {
        Command::Catalog { catalog: path, category } => {
            let products = catalog::load_catalog(&path)?;
            catalog::list(&products, &category, config, out)
        }
        Command::Categories { catalog: path } => {
            let products = catalog::load_catalog(&path)?;
            catalog::categories(&products, out)
        }
        Command::AddFromCatalog { catalog: path, id } => {
            let products = catalog::load_catalog(&path)?;
            let mut service = open_cart(config)?;
            catalog::add_from_catalog(&mut service, &products, id, out)
        }
        Command::Show => cart::show(&open_cart(config)?, config, out),
        Command::Add {
            id,
            title,
            price,
            category,
            image,
            bypass_limit,
        } => {
            let mut candidate = ItemCandidate::new(id, title, price);
            if let Some(category) = category {
                candidate = candidate.with_field("category", category);
            }
            if let Some(image) = image {
                candidate = candidate.with_field("image", image);
            }
            cart::add(&mut open_cart(config)?, &candidate, bypass_limit, out)
        }
        Command::AddJson { json, bypass_limit } => {
            cart::add_json(&mut open_cart(config)?, &json, bypass_limit, out)
        }
        Command::Update {
            id,
            quantity,
            allow_overflow,
        } => cart::update(&mut open_cart(config)?, id, quantity, allow_overflow, out),
        Command::Remove { id } => cart::remove(&mut open_cart(config)?, id, out),
        Command::Empty => cart::empty(&mut open_cart(config)?, out),
        Command::Limits => cart::limits(&open_cart(config)?, out),
    }
}

/// Opens the persisted cart in the configured data directory.
pub fn open_cart(config: &AppConfig) -> CliResult<CartService<FileStore>> {
    let store = FileStore::open(&config.data_dir)?;
    let storage = CartStorage::new(store)
        .with_key(config.cart_key.as_str())
        .with_limits(config.limits);

    let mut service = CartService::from_storage(storage);
    service.register_observer(|items: &[LineItem]| {
        let units = items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity));
        info!(products = items.len(), units, "cart updated");
    });

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::CartLimits;

    fn config(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        }
    }

    fn run(command: Command, config: &AppConfig) -> CliResult<String> {
        let mut out = Vec::new();
        execute(command, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn add(id: i64) -> Command {
        Command::Add {
            id,
            title: format!("Product {}", id),
            price: 10.0,
            category: Some("electronics".to_string()),
            image: None,
            bypass_limit: false,
        }
    }

    #[test]
    fn test_cart_survives_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        run(add(1), &config).unwrap();
        run(add(1), &config).unwrap();
        run(add(2), &config).unwrap();

        let text = run(Command::Show, &config).unwrap();
        assert!(text.starts_with("Cart: 2 products, 3 units\n"));
        assert!(text.ends_with("Total: $30.00\n"));

        let saved = open_cart(&config).unwrap().cart();
        assert_eq!(saved[0].extra["category"], "electronics");
        assert!(config.data_dir.join("cart").is_file());
    }

    #[test]
    fn test_limits_enforced_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        for _ in 0..3 {
            run(add(1), &config).unwrap();
        }
        let err = run(add(1), &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLimit);

        let text = run(
            Command::Update {
                id: 1,
                quantity: 1,
                allow_overflow: false,
            },
            &config,
        )
        .unwrap();
        assert_eq!(text, "Product 1 quantity set to 1\n");
    }

    #[test]
    fn test_bypass_and_overflow_survive_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        for id in 1..=8 {
            run(add(id), &config).unwrap();
        }
        let ninth = Command::Add {
            id: 9,
            title: "Product 9".to_string(),
            price: 10.0,
            category: None,
            image: None,
            bypass_limit: true,
        };
        run(ninth, &config).unwrap();
        run(
            Command::Update {
                id: 9,
                quantity: 3_000_000_000,
                allow_overflow: true,
            },
            &config,
        )
        .unwrap();

        let reopened = open_cart(&config).unwrap();
        assert_eq!(reopened.item_count(), 9);
        assert_eq!(reopened.cart()[8].quantity, 3_000_000_000);

        let text = run(Command::Show, &config).unwrap();
        assert!(text.starts_with("Cart: 9 products, 3000000008 units\n"));
        assert!(run(add(10), &config).is_err());
    }

    #[test]
    fn test_custom_key_and_limits() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            cart_key: "guest".to_string(),
            limits: CartLimits::new(1, 5),
            ..config(&dir)
        };

        run(add(1), &config).unwrap();
        assert!(run(add(2), &config).is_err());
        assert!(config.data_dir.join("guest").is_file());

        let text = run(Command::Limits, &config).unwrap();
        assert_eq!(text, "Max unique products: 1\nMax units per product: 5\n");
    }

    #[test]
    fn test_remove_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        run(add(1), &config).unwrap();
        run(add(2), &config).unwrap();
        run(Command::Remove { id: 1 }, &config).unwrap();
        assert_eq!(open_cart(&config).unwrap().item_count(), 1);

        run(Command::Empty, &config).unwrap();
        assert_eq!(run(Command::Show, &config).unwrap(), "Cart is empty\n");
    }

    #[test]
    fn test_catalog_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let catalog = dir.path().join("products.json");
        std::fs::write(
            &catalog,
            r#"[{"id": 20, "title": "DANVOUY Womens T Shirt", "price": 12.99, "category": "women's clothing"}]"#,
        )
        .unwrap();

        let text = run(
            Command::Categories {
                catalog: catalog.clone(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(text, "women's clothing\n");

        run(
            Command::AddFromCatalog {
                catalog: catalog.clone(),
                id: 20,
            },
            &config,
        )
        .unwrap();
        assert_eq!(open_cart(&config).unwrap().total().cents(), 1299);
    }
}
