//! My Shop Cart - Cart and wishlist persistence.
//!
//! [`CartStore`] keeps a cart and a wishlist in a string-keyed
//! [`KeyValueStore`], reading and rewriting the whole collection on every
//! change. UI concerns are kept out of the store: it emits [`CartEvent`]s to
//! registered [`CartObserver`]s, and [`CartBadge`] is the observer that keeps
//! cart count badges in sync.
//!
//! # Example
//!
//! ```
//! use my_shop_cart::{CartStore, MemoryStore};
//! use my_shop_core::{Price, Product, ProductId};
//!
//! let mut store = CartStore::new(MemoryStore::new());
//! let watch = Product::new(ProductId::new(1), "Smart Watch", "1990".parse::<Price>()?);
//!
//! store.add_to_cart(watch.clone(), 2)?;
//! assert_eq!(store.cart_total_qty()?, 2);
//!
//! assert!(store.toggle_wishlist(watch)?);
//! assert!(store.is_wishlist(&ProductId::new(1))?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod badge;
pub mod error;
pub mod events;
pub mod storage;
pub mod store;

pub use badge::{
    BADGE_ATTRIBUTE, BadgeElement, BadgeHost, CartBadge, ElementNode, HIDDEN_CLASS, Page,
};
pub use error::{Result, StoreError};
pub use events::{CartEvent, CartObserver};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, StorageKeys};
