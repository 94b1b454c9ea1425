//! Change notifications emitted by the cart store.
//!
//! The store never touches UI elements itself. Anything that mirrors cart
//! state (badges, counters, logs) subscribes as a [`CartObserver`].

use my_shop_core::ProductId;

/// A change in cart or wishlist state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// The cart was saved or a refresh was requested.
    TotalQtyChanged {
        /// Sum of all line quantities after the change.
        total_qty: u64,
    },
    /// A product was added to or removed from the wishlist.
    WishlistChanged {
        /// Product that was toggled.
        product_id: ProductId,
        /// Whether the product is in the wishlist afterwards.
        in_wishlist: bool,
    },
}

/// Receives [`CartEvent`]s from a [`CartStore`](crate::CartStore).
pub trait CartObserver {
    /// Called once per event, in emission order.
    fn on_event(&mut self, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent),
{
    fn on_event(&mut self, event: &CartEvent) {
        self(event);
    }
}
