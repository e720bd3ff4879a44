//! # Catalog Commands
//!
//! Browse a product catalog file and add its products to the cart.
//!
//! The catalog is a JSON array of products:
//! ```json
//! [{"id": 1, "title": "Fjallraven Backpack", "price": 109.95,
//!   "category": "men's clothing", "image": "https://...", "rating": {"rate": 3.9, "count": 120}}]
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use storefront_cart::CartService;
use storefront_core::catalog::{categories as distinct_categories, filter_by_category, find_product};
use storefront_core::{CatalogProduct, ItemCandidate, Money};
use storefront_storage::KeyValueStore;
use tracing::debug;

use crate::commands::cart;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Reads a catalog file.
pub fn load_catalog(path: &Path) -> CliResult<Vec<CatalogProduct>> {
    let raw = fs::read_to_string(path).map_err(|e| CliError::catalog(path, e))?;
    let products: Vec<CatalogProduct> =
        serde_json::from_str(&raw).map_err(|e| CliError::catalog(path, e))?;

    debug!(path = %path.display(), products = products.len(), "catalog loaded");
    Ok(products)
}

/// Lists the products in a category ("all" lists everything).
pub fn list(
    products: &[CatalogProduct],
    category: &str,
    config: &AppConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    let matches = filter_by_category(products, category);
    if matches.is_empty() {
        writeln!(out, "No products in category '{}'", category)?;
        return Ok(());
    }

    for product in matches {
        let price = config.format_currency(Money::from_major(product.price));
        writeln!(
            out,
            "  #{:<5} {:<40} {:>10}  [{}]",
            product.id, product.title, price, product.category
        )?;
    }
    Ok(())
}

/// Lists the distinct categories in first-seen order.
pub fn categories(products: &[CatalogProduct], out: &mut impl Write) -> CliResult<()> {
    for category in distinct_categories(products) {
        writeln!(out, "{}", category)?;
    }
    Ok(())
}

/// Adds one unit of a catalog product to the cart.
///
/// The product's description, category, image and rating travel with the
/// line item.
pub fn add_from_catalog<S: KeyValueStore>(
    cart_service: &mut CartService<S>,
    products: &[CatalogProduct],
    id: i64,
    out: &mut impl Write,
) -> CliResult<()> {
    let product =
        find_product(products, id).ok_or_else(|| CliError::not_found("Catalog product", id))?;
    cart::add(cart_service, &ItemCandidate::from(product), false, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_storage::MemoryStore;

    const CATALOG: &str = r#"[
        {"id": 1, "title": "Fjallraven Backpack", "price": 109.95, "category": "men's clothing",
         "image": "https://example.com/1.jpg", "rating": {"rate": 3.9, "count": 120}},
        {"id": 5, "title": "Naga Bracelet", "price": 695, "category": "jewelery"},
        {"id": 9, "title": "WD 2TB Drive", "price": 64, "category": "electronics"},
        {"id": 10, "title": "SanDisk SSD", "price": 109, "category": "electronics"}
    ]"#;

    fn write_catalog() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, CATALOG).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_catalog() {
        let (_dir, path) = write_catalog();
        let products = load_catalog(&path).unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[0].rating.count, 120);
    }

    #[test]
    fn test_load_catalog_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_catalog(&missing).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{}").unwrap();
        assert!(load_catalog(&bad).is_err());
    }

    #[test]
    fn test_list_and_categories() {
        let (_dir, path) = write_catalog();
        let products = load_catalog(&path).unwrap();
        let config = AppConfig::default();

        let mut out = Vec::new();
        list(&products, "electronics", &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("$64.00"));

        let mut out = Vec::new();
        list(&products, "all", &config, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 4);

        let mut out = Vec::new();
        list(&products, "toys", &config, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No products in category 'toys'\n");

        let mut out = Vec::new();
        categories(&products, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "men's clothing\njewelery\nelectronics\n"
        );
    }

    #[test]
    fn test_add_from_catalog() {
        let (_dir, path) = write_catalog();
        let products = load_catalog(&path).unwrap();
        let mut cart_service = CartService::new(MemoryStore::new());

        add_from_catalog(&mut cart_service, &products, 1, &mut Vec::new()).unwrap();
        let items = cart_service.cart();
        assert_eq!(items[0].title, "Fjallraven Backpack");
        assert_eq!(items[0].extra["image"], "https://example.com/1.jpg");

        let err =
            add_from_catalog(&mut cart_service, &products, 99, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Catalog product not found: 99");
    }
}
