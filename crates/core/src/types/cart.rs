//! Cart line items and the cart collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// Key under which a cart item stores its quantity.
const QTY_FIELD: &str = "qty";

/// Errors raised when a change would break the cart's invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line item must hold at least one unit.
    #[error("quantity for product {0} must be at least 1")]
    ZeroQuantity(ProductId),
    /// Each product may appear at most once.
    #[error("product {0} appears more than once in the cart")]
    DuplicateProduct(ProductId),
    /// The quantity does not fit in a line item.
    #[error("quantity for product {0} is too large")]
    QuantityOverflow(ProductId),
    /// A line total or the cart total exceeds the largest representable amount.
    #[error("price total is too large to represent")]
    TotalOverflow,
}

/// A product together with how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product, serialized inline.
    #[serde(flatten)]
    pub product: Product,
    /// Number of units, always at least 1 inside a [`Cart`].
    pub qty: u32,
}

impl CartItem {
    /// Create a line item.
    ///
    /// A `qty` attribute carried by the product is dropped so it cannot
    /// shadow the line quantity once serialized.
    #[must_use]
    pub fn new(mut product: Product, qty: u32) -> Self {
        product.attributes.remove(QTY_FIELD);
        Self { product, qty }
    }

    /// Returns the product identifier.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Returns `price * qty`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the product does not fit in a [`Decimal`].
    pub fn line_total(&self) -> Result<Decimal, CartError> {
        self.product
            .price
            .times(self.qty)
            .ok_or(CartError::TotalOverflow)
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// No item with that identifier exists; nothing changed.
    Missing,
    /// The requested quantity was zero or negative, so the item was removed.
    Removed,
    /// The item now holds the requested quantity.
    Updated,
}

/// Ordered line items, unique by product identifier.
///
/// Items keep the order in which they were first added. Serializes as a
/// JSON array of [`CartItem`] objects; deserialization rejects arrays that
/// repeat an identifier or contain a zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from existing items, validating them.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier repeats or an item has zero quantity.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if item.qty == 0 {
                return Err(CartError::ZeroQuantity(item.id().clone()));
            }
            if !seen.insert(item.id()) {
                return Err(CartError::DuplicateProduct(item.id().clone()));
            }
        }
        Ok(Self { items })
    }

    /// Returns the line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the item for a product, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Returns true if the product is in the cart.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `qty` units of a product.
    ///
    /// Increments the existing line for the product, or appends a new line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `qty` is zero and
    /// [`CartError::QuantityOverflow`] if the new quantity exceeds `u32::MAX`.
    pub fn add(&mut self, product: Product, qty: u32) -> Result<(), CartError> {
        if qty == 0 {
            return Err(CartError::ZeroQuantity(product.id));
        }

        if let Some(item) = self.items.iter_mut().find(|item| *item.id() == product.id) {
            item.qty = item
                .qty
                .checked_add(qty)
                .ok_or(CartError::QuantityOverflow(product.id))?;
        } else {
            self.items.push(CartItem::new(product, qty));
        }
        Ok(())
    }

    /// Remove the line for a product, returning it if it was present.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Set the quantity of an existing line.
    ///
    /// Absent products are left alone. A quantity of zero or less removes the
    /// line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if `next_qty` exceeds `u32::MAX`.
    pub fn set_quantity(
        &mut self,
        id: &ProductId,
        next_qty: i64,
    ) -> Result<QuantityUpdate, CartError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return Ok(QuantityUpdate::Missing);
        };

        if next_qty <= 0 {
            self.remove(id);
            return Ok(QuantityUpdate::Removed);
        }

        item.qty =
            u32::try_from(next_qty).map_err(|_| CartError::QuantityOverflow(id.clone()))?;
        Ok(QuantityUpdate::Updated)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Sum of `price * qty` over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if a line total or the sum exceeds
    /// [`Decimal::MAX`].
    pub fn total_price(&self) -> Result<Decimal, CartError> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total
                .checked_add(item.line_total()?)
                .ok_or(CartError::TotalOverflow)
        })
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
