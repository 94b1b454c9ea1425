//! Integration tests for My Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p my-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart operations through `CartStore`
//! - `wishlist` - Wishlist toggling and membership
//! - `badge` - Badge rendering driven by store events
//! - `file_store` - Persistence across store instances
//!
//! This library holds the shared fixtures.

use my_shop_core::{Price, Product, ProductId};
use rust_decimal::Decimal;

/// A product with a whole-number price.
///
/// # Panics
///
/// Panics if `price` is negative.
#[must_use]
pub fn product(id: i64, price: i64) -> Product {
    named_product(id, &format!("Product {id}"), price)
}

/// A product with a string identifier and a whole-number price.
///
/// # Panics
///
/// Panics if `price` is negative.
#[must_use]
pub fn sku_product(sku: &str, price: i64) -> Product {
    Product::new(ProductId::text(sku), format!("Product {sku}"), whole_price(price))
}

/// A named product with a whole-number price.
///
/// # Panics
///
/// Panics if `price` is negative.
#[must_use]
pub fn named_product(id: i64, name: &str, price: i64) -> Product {
    Product::new(ProductId::new(id), name, whole_price(price))
}

fn whole_price(price: i64) -> Price {
    Price::new(Decimal::new(price, 0)).unwrap_or_else(|e| panic!("fixture price: {e}"))
}

/// The shop's starter catalog.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        named_product(1, "Smart Watch", 1990)
            .with_attribute("category", "Watch")
            .with_attribute("rating", 4.7)
            .with_attribute("is_new", true)
            .with_attribute("is_sale", true),
        named_product(2, "Headphones", 1490)
            .with_attribute("category", "Electronics")
            .with_attribute("rating", 4.5),
        named_product(3, "Backpack", 890)
            .with_attribute("category", "Fashion")
            .with_attribute("rating", 4.4)
            .with_attribute("is_sale", true),
        named_product(4, "Sneakers", 1290)
            .with_attribute("category", "Fashion")
            .with_attribute("rating", 4.6)
            .with_attribute("is_new", true),
    ]
}
