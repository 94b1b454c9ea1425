//! Product type as supplied by the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Price, ProductId};

/// A product that can be placed in the cart or the wishlist.
///
/// Only the identifier, name, and price are interpreted. Any other display
/// attributes (`image_url`, `category`, `rating`, ...) are carried verbatim
/// and written back alongside the known fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Remaining display attributes.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Create a product without extra display attributes.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            attributes: Map::new(),
        }
    }

    /// Attach a display attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up a display attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
