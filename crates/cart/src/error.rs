//! Error type for cart store operations.

use my_shop_core::CartError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::CartStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A stored collection could not be parsed or breaks its invariants.
    ///
    /// Corrupt data is never replaced silently; the caller decides whether to
    /// clear the key.
    #[error("Stored value under {key:?} is corrupt: {source}")]
    Corrupt {
        /// Storage key holding the bad value.
        key: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The requested change would break the cart's invariants.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use my_shop_core::ProductId;

    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Cart(CartError::ZeroQuantity(ProductId::new(4)));
        assert_eq!(
            err.to_string(),
            "Cart error: quantity for product 4 must be at least 1"
        );

        let err = StoreError::Storage(StorageError::QuotaExceeded {
            key: "cart".to_string(),
            limit: 16,
        });
        assert_eq!(
            err.to_string(),
            "Storage error: storage quota of 16 bytes exceeded while writing \"cart\""
        );
    }

    #[test]
    fn test_corrupt_display_names_key() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = StoreError::Corrupt {
            key: "wishlist".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Stored value under \"wishlist\" is corrupt"));
    }
}
