//! My Shop Core - Shared cart and wishlist types.
//!
//! This crate provides the value types behind the shop's cart and wishlist:
//! - [`Product`] - A catalog product as supplied by the caller
//! - [`Cart`] / [`CartItem`] - Ordered line items, unique by product
//! - [`Wishlist`] - Saved products, unique by product
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no storage, no
//! I/O, no UI. Persistence and change notification live in `my-shop-cart`.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and the cart/wishlist collections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
