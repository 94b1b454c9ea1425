//! Cart and wishlist store.
//!
//! # Consistency
//!
//! Every mutation reads the whole collection, changes it in memory, and
//! writes the whole collection back. Nothing is locked: two writers sharing
//! one backend overwrite each other and the last write wins. A store assumes
//! it is the only writer for its keys.

use std::fmt;

use my_shop_core::{Cart, Product, ProductId, QuantityUpdate, Wishlist};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::{Result, StoreError};
use crate::events::{CartEvent, CartObserver};
use crate::storage::KeyValueStore;

/// Storage keys for the two persisted collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key holding the serialized cart.
    pub cart: String,
    /// Key holding the serialized wishlist.
    pub wishlist: String,
}

impl StorageKeys {
    /// Default key for the cart.
    pub const DEFAULT_CART: &'static str = "cart";
    /// Default key for the wishlist.
    pub const DEFAULT_WISHLIST: &'static str = "wishlist";
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            cart: Self::DEFAULT_CART.to_string(),
            wishlist: Self::DEFAULT_WISHLIST.to_string(),
        }
    }
}

/// Cart and wishlist façade over a [`KeyValueStore`].
pub struct CartStore<S> {
    storage: S,
    keys: StorageKeys,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("keys", &self.keys)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store using the default keys.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, StorageKeys::default())
    }

    /// Create a store using custom keys.
    pub fn with_keys(storage: S, keys: StorageKeys) -> Self {
        Self {
            storage,
            keys,
            observers: Vec::new(),
        }
    }

    /// Register an observer for cart and wishlist events.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns the storage keys.
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Returns the storage backend.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store and returns the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Refresh observers once with the stored cart total.
    ///
    /// Call after attaching observers, when the page has finished loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be read.
    pub fn init(&mut self) -> Result<()> {
        tracing::debug!("Initializing cart badge");
        self.update_cart_badge()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Read the stored cart. Missing or empty values read as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is not a valid cart.
    pub fn cart(&self) -> Result<Cart> {
        self.load(&self.keys.cart)
    }

    /// Persist the full cart, then notify observers of the new total.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    #[instrument(skip(self, cart), fields(items = cart.len()))]
    pub fn save_cart(&mut self, cart: &Cart) -> Result<()> {
        let key = self.keys.cart.clone();
        self.persist(&key, cart)?;
        self.emit(&CartEvent::TotalQtyChanged {
            total_qty: cart.total_quantity(),
        });
        Ok(())
    }

    /// Add `qty` units of a product, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] if `qty` is zero or the line would
    /// overflow, or a storage error.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: Product, qty: u32) -> Result<()> {
        let mut cart = self.cart()?;
        cart.add(product, qty)?;
        tracing::debug!(qty, "Added to cart");
        self.save_cart(&cart)
    }

    /// Add a single unit of a product.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_to_cart`].
    pub fn add_one_to_cart(&mut self, product: Product) -> Result<()> {
        self.add_to_cart(product, 1)
    }

    /// Remove a product's line. The cart is saved even if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<()> {
        let mut cart = self.cart()?;
        if cart.remove(product_id).is_none() {
            tracing::debug!("Product not in cart");
        }
        self.save_cart(&cart)
    }

    /// Set a line's quantity and report what happened.
    ///
    /// Does nothing if the product is not in the cart. A quantity of zero or
    /// less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] if `next_qty` is too large, or a storage
    /// error.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub fn update_qty(
        &mut self,
        product_id: &ProductId,
        next_qty: i64,
    ) -> Result<QuantityUpdate> {
        let mut cart = self.cart()?;
        let outcome = cart.set_quantity(product_id, next_qty)?;
        match outcome {
            QuantityUpdate::Missing => {
                tracing::debug!("Product not in cart, nothing to update");
            }
            QuantityUpdate::Removed | QuantityUpdate::Updated => self.save_cart(&cart)?,
        }
        Ok(outcome)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<()> {
        self.save_cart(&Cart::new())
    }

    /// Sum of all line quantities.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be read.
    pub fn cart_total_qty(&self) -> Result<u64> {
        Ok(self.cart()?.total_quantity())
    }

    /// Sum of `price * qty` over all lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be read, or
    /// [`StoreError::Cart`] if the total is too large to represent.
    pub fn cart_total_price(&self) -> Result<Decimal> {
        Ok(self.cart()?.total_price()?)
    }

    /// The cart serialized as submitted with an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be read.
    pub fn cart_payload(&self) -> Result<String> {
        serde_json::to_string(&self.cart()?).map_err(StoreError::Serialize)
    }

    /// Notify observers of the current cart total.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be read.
    pub fn update_cart_badge(&mut self) -> Result<()> {
        let total_qty = self.cart_total_qty()?;
        self.emit(&CartEvent::TotalQtyChanged { total_qty });
        Ok(())
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Read the stored wishlist. Missing or empty values read as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is not a valid
    /// wishlist.
    pub fn wishlist(&self) -> Result<Wishlist> {
        self.load(&self.keys.wishlist)
    }

    /// Save a product, or remove it if already saved.
    ///
    /// Returns `true` if the product is in the wishlist afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be read or written.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn toggle_wishlist(&mut self, product: Product) -> Result<bool> {
        let product_id = product.id.clone();
        let mut wishlist = self.wishlist()?;
        let in_wishlist = wishlist.toggle(product);
        self.save_wishlist(&wishlist)?;

        tracing::debug!(in_wishlist, "Wishlist toggled");
        self.emit(&CartEvent::WishlistChanged {
            product_id,
            in_wishlist,
        });
        Ok(in_wishlist)
    }

    /// Remove a product from the wishlist.
    ///
    /// Returns `true` if the product was saved before the call. Nothing is
    /// written when it was not.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be read or written.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub fn remove_from_wishlist(&mut self, product_id: &ProductId) -> Result<bool> {
        let mut wishlist = self.wishlist()?;
        if wishlist.remove(product_id).is_none() {
            return Ok(false);
        }
        self.save_wishlist(&wishlist)?;
        self.emit(&CartEvent::WishlistChanged {
            product_id: product_id.clone(),
            in_wishlist: false,
        });
        Ok(true)
    }

    /// Returns true if the product is in the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored wishlist cannot be read.
    pub fn is_wishlist(&self, product_id: &ProductId) -> Result<bool> {
        Ok(self.wishlist()?.contains(product_id))
    }

    /// Number of saved products.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored wishlist cannot be read.
    pub fn wishlist_count(&self) -> Result<usize> {
        Ok(self.wishlist()?.len())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn save_wishlist(&mut self, wishlist: &Wishlist) -> Result<()> {
        let key = self.keys.wishlist.clone();
        self.persist(&key, wishlist)
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(T::default());
        };
        if raw.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&raw).map_err(|source| {
            tracing::warn!(key, error = %source, "Stored value is corrupt");
            StoreError::Corrupt {
                key: key.to_string(),
                source,
            }
        })
    }

    fn persist<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(StoreError::Serialize)?;
        self.storage.set(key, raw)?;
        Ok(())
    }

    fn emit(&mut self, event: &CartEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use my_shop_core::{CartError, Price};

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn product(id: i64, price: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            Price::new(Decimal::new(price, 0)).unwrap(),
        )
    }

    fn recording_store() -> (CartStore<MemoryStore>, Rc<RefCell<Vec<CartEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::new(MemoryStore::new());
        let sink = Rc::clone(&events);
        store.subscribe(move |event: &CartEvent| sink.borrow_mut().push(event.clone()));
        (store, events)
    }

    #[test]
    fn test_empty_store_reads_empty_collections() {
        let store = CartStore::new(MemoryStore::new());
        assert!(store.cart().unwrap().is_empty());
        assert!(store.wishlist().unwrap().is_empty());
        assert_eq!(store.cart_total_qty().unwrap(), 0);
        assert_eq!(store.cart_total_price().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_empty_string_reads_as_empty_cart() {
        let mut storage = MemoryStore::new();
        storage.set("cart", String::new()).unwrap();
        let store = CartStore::new(storage);
        assert!(store.cart().unwrap().is_empty());
    }

    #[test]
    fn test_add_to_cart_persists() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_one_to_cart(product(1, 10)).unwrap();

        let raw = store.storage().get("cart").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["qty"], 1);
    }

    #[test]
    fn test_add_accumulates() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_to_cart(product(5, 10), 1).unwrap();
        store.add_to_cart(product(5, 10), 2).unwrap();

        let cart = store.cart().unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::new(5)).unwrap().qty, 3);
    }

    #[test]
    fn test_add_zero_is_rejected_without_saving() {
        let (mut store, events) = recording_store();
        let err = store.add_to_cart(product(1, 10), 0).unwrap_err();

        assert!(matches!(err, StoreError::Cart(_)));
        assert!(store.storage().get("cart").unwrap().is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_every_save_emits_total() {
        let (mut store, events) = recording_store();
        store.add_to_cart(product(1, 10), 2).unwrap();
        store.add_to_cart(product(2, 5), 3).unwrap();
        store.remove_from_cart(&ProductId::new(1)).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                CartEvent::TotalQtyChanged { total_qty: 2 },
                CartEvent::TotalQtyChanged { total_qty: 5 },
                CartEvent::TotalQtyChanged { total_qty: 3 },
            ]
        );
    }

    #[test]
    fn test_remove_missing_still_saves() {
        let (mut store, events) = recording_store();
        store.remove_from_cart(&ProductId::new(9)).unwrap();

        assert_eq!(store.storage().get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_update_qty_missing_is_noop() {
        let (mut store, events) = recording_store();
        assert_eq!(
            store.update_qty(&ProductId::new(3), 4).unwrap(),
            QuantityUpdate::Missing
        );

        assert!(store.storage().get("cart").unwrap().is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_update_qty_sets_and_removes() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_to_cart(product(1, 10), 1).unwrap();
        store.add_to_cart(product(2, 10), 1).unwrap();

        assert_eq!(
            store.update_qty(&ProductId::new(1), 6).unwrap(),
            QuantityUpdate::Updated
        );
        assert_eq!(store.cart().unwrap().get(&ProductId::new(1)).unwrap().qty, 6);

        assert_eq!(
            store.update_qty(&ProductId::new(1), 0).unwrap(),
            QuantityUpdate::Removed
        );
        store.update_qty(&ProductId::new(2), -1).unwrap();
        assert!(store.cart().unwrap().is_empty());
    }

    #[test]
    fn test_totals() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_to_cart(product(1, 10), 2).unwrap();
        store.add_to_cart(product(2, 5), 3).unwrap();

        assert_eq!(store.cart_total_qty().unwrap(), 5);
        assert_eq!(store.cart_total_price().unwrap(), Decimal::new(35, 0));
    }

    #[test]
    fn test_total_price_overflow_is_an_error() {
        let mut store = CartStore::new(MemoryStore::new());
        let huge = Product::new(
            ProductId::new(1),
            "Huge",
            "100000000000000000000".parse::<Price>().unwrap(),
        );
        store.add_to_cart(huge, 4_000_000_000).unwrap();

        assert_eq!(store.cart_total_qty().unwrap(), 4_000_000_000);
        assert!(matches!(
            store.cart_total_price(),
            Err(StoreError::Cart(CartError::TotalOverflow))
        ));
    }

    #[test]
    fn test_string_ids_are_read_from_storage() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                "cart",
                r#"[{"id":"sku-5","name":"A","price":10,"qty":1}]"#.to_string(),
            )
            .unwrap();
        let mut store = CartStore::new(storage);

        assert_eq!(store.cart_total_qty().unwrap(), 1);
        store.add_to_cart(product(5, 10), 2).unwrap();
        assert_eq!(store.cart().unwrap().len(), 2);

        store.remove_from_cart(&ProductId::text("sku-5")).unwrap();
        assert_eq!(store.cart_total_qty().unwrap(), 2);
    }

    #[test]
    fn test_clear_cart() {
        let (mut store, events) = recording_store();
        store.add_to_cart(product(1, 10), 2).unwrap();
        store.clear_cart().unwrap();

        assert!(store.cart().unwrap().is_empty());
        assert_eq!(
            events.borrow().last(),
            Some(&CartEvent::TotalQtyChanged { total_qty: 0 })
        );
    }

    #[test]
    fn test_cart_payload_matches_stored_cart() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_to_cart(product(1, 10), 2).unwrap();

        let payload = store.cart_payload().unwrap();
        let parsed: Cart = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed, store.cart().unwrap());
    }

    #[test]
    fn test_init_emits_stored_total() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                "cart",
                r#"[{"id":1,"name":"Sneakers","price":1290,"qty":4}]"#.to_string(),
            )
            .unwrap();

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut store = CartStore::new(storage);
        store.subscribe(move |event: &CartEvent| sink.borrow_mut().push(event.clone()));
        store.init().unwrap();

        assert_eq!(
            *events.borrow(),
            vec![CartEvent::TotalQtyChanged { total_qty: 4 }]
        );
    }

    #[test]
    fn test_corrupt_cart_is_an_error() {
        let mut storage = MemoryStore::new();
        storage.set("cart", "{not json".to_string()).unwrap();
        let mut store = CartStore::new(storage);

        assert!(matches!(
            store.cart(),
            Err(StoreError::Corrupt { ref key, .. }) if key == "cart"
        ));
        assert!(store.add_one_to_cart(product(1, 1)).is_err());
        // The corrupt value is left in place.
        assert_eq!(
            store.storage().get("cart").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_duplicate_ids_in_storage_are_corrupt() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                "wishlist",
                r#"[{"id":1,"name":"A","price":1},{"id":1,"name":"A","price":1}]"#.to_string(),
            )
            .unwrap();
        let store = CartStore::new(storage);

        assert!(matches!(
            store.is_wishlist(&ProductId::new(1)),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_quota_failure_surfaces_and_skips_event() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut store = CartStore::new(MemoryStore::with_quota(8));
        store.subscribe(move |event: &CartEvent| sink.borrow_mut().push(event.clone()));

        let err = store.add_one_to_cart(product(1, 10)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Storage(StorageError::QuotaExceeded { .. })
        ));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_toggle_wishlist() {
        let (mut store, events) = recording_store();

        assert!(store.toggle_wishlist(product(2, 10)).unwrap());
        assert!(store.is_wishlist(&ProductId::new(2)).unwrap());

        assert!(!store.toggle_wishlist(product(2, 10)).unwrap());
        assert!(!store.is_wishlist(&ProductId::new(2)).unwrap());

        assert_eq!(
            *events.borrow(),
            vec![
                CartEvent::WishlistChanged {
                    product_id: ProductId::new(2),
                    in_wishlist: true,
                },
                CartEvent::WishlistChanged {
                    product_id: ProductId::new(2),
                    in_wishlist: false,
                },
            ]
        );
    }

    #[test]
    fn test_remove_from_wishlist() {
        let mut store = CartStore::new(MemoryStore::new());
        store.toggle_wishlist(product(1, 10)).unwrap();
        store.toggle_wishlist(product(2, 10)).unwrap();

        assert!(store.remove_from_wishlist(&ProductId::new(1)).unwrap());
        assert!(!store.remove_from_wishlist(&ProductId::new(1)).unwrap());
        assert_eq!(store.wishlist_count().unwrap(), 1);
    }

    #[test]
    fn test_custom_keys() {
        let keys = StorageKeys {
            cart: "shop:cart".to_string(),
            wishlist: "shop:wishlist".to_string(),
        };
        let mut store = CartStore::with_keys(MemoryStore::new(), keys);
        store.add_one_to_cart(product(1, 10)).unwrap();
        store.toggle_wishlist(product(1, 10)).unwrap();

        let storage = store.into_storage();
        assert!(storage.get("shop:cart").unwrap().is_some());
        assert!(storage.get("shop:wishlist").unwrap().is_some());
        assert!(storage.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_cart_and_wishlist_are_independent() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_one_to_cart(product(1, 10)).unwrap();

        assert!(!store.is_wishlist(&ProductId::new(1)).unwrap());
        store.toggle_wishlist(product(1, 10)).unwrap();
        assert_eq!(store.cart_total_qty().unwrap(), 1);
    }
}
