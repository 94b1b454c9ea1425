//! Wishlist commands.

use my_shop_cart::{CartStore, KeyValueStore, StoreError};
use my_shop_core::{Product, ProductId};
use tracing::info;

/// Print saved products.
///
/// # Errors
///
/// Returns an error if the stored wishlist cannot be read.
pub fn show<S: KeyValueStore>(store: &CartStore<S>) -> Result<(), StoreError> {
    let wishlist = store.wishlist()?;

    #[allow(clippy::print_stdout)]
    {
        if wishlist.is_empty() {
            println!("Wishlist is empty");
        }
        for product in &wishlist {
            println!(
                "{:>5}  {:<30} {:>10.2}",
                product.id.to_string(),
                product.name,
                product.price.amount()
            );
        }
    }
    Ok(())
}

/// Save a product, or unsave it if already saved.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn toggle<S: KeyValueStore>(
    store: &mut CartStore<S>,
    product: Product,
) -> Result<(), StoreError> {
    let id = product.id.clone();
    if store.toggle_wishlist(product)? {
        info!(product_id = %id, "Added to wishlist");
    } else {
        info!(product_id = %id, "Removed from wishlist");
    }
    Ok(())
}

/// Print whether a product is saved.
///
/// # Errors
///
/// Returns an error if the stored wishlist cannot be read.
pub fn check<S: KeyValueStore>(store: &CartStore<S>, id: ProductId) -> Result<(), StoreError> {
    let saved = store.is_wishlist(&id)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{saved}");
    }
    Ok(())
}

/// Unsave a product.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn remove<S: KeyValueStore>(
    store: &mut CartStore<S>,
    id: ProductId,
) -> Result<(), StoreError> {
    if store.remove_from_wishlist(&id)? {
        info!(product_id = %id, "Removed from wishlist");
    } else {
        tracing::warn!(product_id = %id, "Product is not in the wishlist");
    }
    Ok(())
}
