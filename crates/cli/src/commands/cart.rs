//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! shop-cli cart add --id 2 --name Headphones --price 1490
//! shop-cli cart remove --id 2
//! shop-cli cart export > cart.json
//! ```

use my_shop_cart::{CartStore, KeyValueStore, StoreError};
use my_shop_core::{Cart, CartError, Product, ProductId, QuantityUpdate};
use tracing::info;

/// Print every line and the cart totals.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be read or its total is too
/// large to represent.
pub fn show<S: KeyValueStore>(store: &CartStore<S>) -> Result<(), StoreError> {
    let table = render(&store.cart()?)?;

    #[allow(clippy::print_stdout)]
    {
        print!("{table}");
    }
    Ok(())
}

/// Add units of a product.
///
/// # Errors
///
/// Returns an error if the quantity is invalid or storage fails.
pub fn add<S: KeyValueStore>(
    store: &mut CartStore<S>,
    product: Product,
    qty: u32,
) -> Result<(), StoreError> {
    let id = product.id.clone();
    store.add_to_cart(product, qty)?;
    info!(product_id = %id, qty, "Added to cart");
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn remove<S: KeyValueStore>(
    store: &mut CartStore<S>,
    id: ProductId,
) -> Result<(), StoreError> {
    store.remove_from_cart(&id)?;
    info!(product_id = %id, "Removed from cart");
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the quantity is too large or storage fails.
pub fn update<S: KeyValueStore>(
    store: &mut CartStore<S>,
    id: ProductId,
    qty: i64,
) -> Result<(), StoreError> {
    match store.update_qty(&id, qty)? {
        QuantityUpdate::Updated => info!(product_id = %id, qty, "Quantity updated"),
        QuantityUpdate::Removed => info!(product_id = %id, "Removed from cart"),
        QuantityUpdate::Missing => {
            tracing::warn!(product_id = %id, "Product is not in the cart");
        }
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn clear<S: KeyValueStore>(store: &mut CartStore<S>) -> Result<(), StoreError> {
    store.clear_cart()?;
    info!("Cart cleared");
    Ok(())
}

/// Print the cart payload as JSON.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be read.
pub fn export<S: KeyValueStore>(store: &CartStore<S>) -> Result<(), StoreError> {
    let payload = store.cart_payload()?;

    #[allow(clippy::print_stdout)]
    {
        println!("{payload}");
    }
    Ok(())
}

/// Format the cart as a plain-text table.
fn render(cart: &Cart) -> Result<String, CartError> {
    use std::fmt::Write;

    if cart.is_empty() {
        return Ok("Cart is empty\n".to_string());
    }

    let mut out = String::new();
    for item in cart {
        let _ = writeln!(
            out,
            "{:>5}  {:<30} {:>4} x {:>10.2} = {:>10.2}",
            item.id().to_string(),
            item.product.name,
            item.qty,
            item.product.price.amount(),
            item.line_total()?
        );
    }
    let _ = writeln!(out, "Items: {}", cart.total_quantity());
    let _ = writeln!(out, "Total: {:.2}", cart.total_price()?);
    Ok(out)
}
