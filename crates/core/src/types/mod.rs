//! Core types for My Shop.
//!
//! This module provides type-safe wrappers for products, prices, and the two
//! persisted collections.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod wishlist;

pub use cart::{Cart, CartError, CartItem, QuantityUpdate};
pub use id::{ProductId, ProductIdError};
pub use price::{Price, PriceError};
pub use product::Product;
pub use wishlist::{Wishlist, WishlistError};
