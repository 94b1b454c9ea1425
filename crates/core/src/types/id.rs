//! Product identifiers.
//!
//! Product IDs are opaque: a stored cart may carry them as JSON numbers or
//! JSON strings, and both forms are kept exactly as stored. The number `5`
//! and the string `"5"` are different products.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`] from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input is blank.
    #[error("product id must not be empty")]
    Empty,
    /// The input is quoted but not a valid JSON string.
    #[error("invalid quoted product id: {0}")]
    InvalidQuoted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Int(i64),
    Str(String),
}

/// Opaque product identifier, either an integer or a string.
///
/// Serializes as a bare JSON number or string, matching how it was supplied.
///
/// ## Examples
///
/// ```
/// use my_shop_core::ProductId;
///
/// let numeric = ProductId::new(5);
/// let text = ProductId::text("5");
/// assert_ne!(numeric, text);
///
/// assert_eq!("5".parse::<ProductId>().unwrap(), numeric);
/// assert_eq!("\"5\"".parse::<ProductId>().unwrap(), text);
/// assert_eq!("sku-5".parse::<ProductId>().unwrap(), ProductId::text("sku-5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Repr);

impl ProductId {
    /// Create a numeric ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(Repr::Int(id))
    }

    /// Create a string ID.
    #[must_use]
    pub fn text(id: impl Into<String>) -> Self {
        Self(Repr::Str(id.into()))
    }

    /// Returns the numeric value, if this is a numeric ID.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self.0 {
            Repr::Int(id) => Some(id),
            Repr::Str(_) => None,
        }
    }

    /// Returns the string value, if this is a string ID.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.0 {
            Repr::Int(_) => None,
            Repr::Str(id) => Some(id),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Int(id) => write!(f, "{id}"),
            Repr::Str(id) => f.write_str(id),
        }
    }
}

/// Integers parse as numeric IDs. A JSON-quoted value such as `"5"` parses
/// as a string ID, and any other text is taken as a string ID verbatim.
impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ProductIdError::Empty);
        }
        if let Ok(id) = s.parse::<i64>() {
            return Ok(Self::new(id));
        }
        if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
            return serde_json::from_str::<String>(s)
                .map(Self::text)
                .map_err(|e| ProductIdError::InvalidQuoted(e.to_string()));
        }
        Ok(Self::text(s))
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::text(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::text(id)
    }
}
