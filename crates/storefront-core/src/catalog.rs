//! # Catalog Records
//!
//! Product records in the format served by the public products API
//! (`GET /products`), plus the category helpers the product grid uses.
//!
//! The cart never talks to the catalog. Front ends turn a
//! [`CatalogProduct`] into an [`ItemCandidate`] and hand that over.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use ts_rs::TS;

use crate::types::ItemCandidate;

/// Category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Average customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogProduct {
    #[ts(type = "number")]
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl From<&CatalogProduct> for ItemCandidate {
    /// Keeps description, category, image and rating as opaque fields so the
    /// cart view can render them.
    fn from(product: &CatalogProduct) -> Self {
        let mut extra = Map::new();
        extra.insert("description".to_string(), json!(product.description));
        extra.insert("category".to_string(), json!(product.category));
        extra.insert("image".to_string(), json!(product.image));
        extra.insert(
            "rating".to_string(),
            json!({ "rate": product.rating.rate, "count": product.rating.count }),
        );

        ItemCandidate {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            extra,
        }
    }
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[CatalogProduct]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        if !seen.contains(&product.category.as_str()) {
            seen.push(&product.category);
        }
    }
    seen
}

/// Products in `category`; [`ALL_CATEGORIES`] matches everything.
pub fn filter_by_category<'a>(
    products: &'a [CatalogProduct],
    category: &str,
) -> Vec<&'a CatalogProduct> {
    products
        .iter()
        .filter(|p| category == ALL_CATEGORIES || p.category == category)
        .collect()
}

/// Looks up a product by id.
pub fn find_product(products: &[CatalogProduct], id: i64) -> Option<&CatalogProduct> {
    products.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogProduct> {
        serde_json::from_value(json!([
            {
                "id": 1,
                "title": "Fjallraven - Foldsack No. 1 Backpack",
                "price": 109.95,
                "description": "Your perfect pack for everyday use",
                "category": "men's clothing",
                "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
                "rating": { "rate": 3.9, "count": 120 }
            },
            {
                "id": 5,
                "title": "John Hardy Women's Legends Naga Bracelet",
                "price": 695,
                "category": "jewelery",
                "rating": { "rate": 4.6, "count": 400 }
            },
            {
                "id": 2,
                "title": "Mens Casual Premium Slim Fit T-Shirts",
                "price": 22.3,
                "category": "men's clothing"
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_catalog_parses_api_format() {
        let products = catalog();
        assert_eq!(products.len(), 3);
        assert_eq!(products[1].price, 695.0);
        assert_eq!(products[2].rating, Rating::default());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let products = catalog();
        assert_eq!(categories(&products), vec!["men's clothing", "jewelery"]);
    }

    #[test]
    fn test_filter_by_category() {
        let products = catalog();
        assert_eq!(filter_by_category(&products, ALL_CATEGORIES).len(), 3);
        assert_eq!(filter_by_category(&products, "men's clothing").len(), 2);
        assert!(filter_by_category(&products, "electronics").is_empty());
    }

    #[test]
    fn test_candidate_from_product() {
        let products = catalog();
        let candidate = ItemCandidate::from(find_product(&products, 1).unwrap());

        assert_eq!(candidate.id, 1);
        assert_eq!(candidate.price, 109.95);
        assert_eq!(candidate.extra["category"], json!("men's clothing"));
        assert_eq!(candidate.extra["rating"]["count"], json!(120));
        assert!(find_product(&products, 99).is_none());
    }
}
