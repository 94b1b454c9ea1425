//! Wishlist collection.

use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// Errors raised when stored wishlist data breaks its invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WishlistError {
    /// Each product may appear at most once.
    #[error("product {0} appears more than once in the wishlist")]
    DuplicateProduct(ProductId),
}

/// Saved products, unique by identifier, in the order they were saved.
///
/// Serializes as a JSON array of [`Product`] objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Wishlist {
    products: Vec<Product>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Build a wishlist from existing products, validating uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::DuplicateProduct`] if an identifier repeats.
    pub fn from_products(products: Vec<Product>) -> Result<Self, WishlistError> {
        let mut seen = std::collections::HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(&p.id)) {
            return Err(WishlistError::DuplicateProduct(dup.id.clone()));
        }
        Ok(Self { products })
    }

    /// Returns the saved products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns true if the product is saved.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.iter().any(|p| p.id == *id)
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Remove a product if present, otherwise save it.
    ///
    /// Returns `true` if the product is in the wishlist afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.remove(&product.id).is_some() {
            false
        } else {
            self.products.push(product);
            true
        }
    }

    /// Remove a product, returning it if it was saved.
    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == *id)?;
        Some(self.products.remove(index))
    }

    /// Remove every product.
    pub fn clear(&mut self) {
        self.products.clear();
    }
}

impl TryFrom<Vec<Product>> for Wishlist {
    type Error = WishlistError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::from_products(products)
    }
}

impl From<Wishlist> for Vec<Product> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.products
    }
}

impl<'a> IntoIterator for &'a Wishlist {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
