//! Integration tests for badge rendering driven by store events.

use std::cell::RefCell;
use std::rc::Rc;

use my_shop_cart::{CartBadge, CartStore, ElementNode, KeyValueStore, MemoryStore, Page};
use my_shop_core::ProductId;
use my_shop_integration_tests::product;

fn page() -> Rc<RefCell<Page>> {
    let mut page = Page::new();
    page.push(ElementNode::badge().with_attribute("id", "nav-cart-count"));
    page.push(ElementNode::new().with_attribute("id", "footer"));
    page.push(ElementNode::badge().with_attribute("id", "mobile-cart-count"));
    Rc::new(RefCell::new(page))
}

fn badge_texts(page: &Rc<RefCell<Page>>) -> Vec<String> {
    page.borrow()
        .badges()
        .map(|e| e.text().to_string())
        .collect()
}

#[test]
fn test_init_renders_stored_count_once() {
    let mut storage = MemoryStore::new();
    storage
        .set(
            "cart",
            r#"[{"id":1,"name":"A","price":10,"qty":2},{"id":2,"name":"B","price":5,"qty":1}]"#
                .to_string(),
        )
        .unwrap();

    let page = page();
    let mut store = CartStore::new(storage);
    store.subscribe(CartBadge::new(Rc::clone(&page)));
    store.init().unwrap();

    assert_eq!(badge_texts(&page), vec!["3", "3"]);
    assert!(page.borrow().badges().all(|e| !e.is_hidden()));
}

#[test]
fn test_empty_cart_hides_badges() {
    let page = page();
    let mut store = CartStore::new(MemoryStore::new());
    store.subscribe(CartBadge::new(Rc::clone(&page)));
    store.init().unwrap();

    assert_eq!(badge_texts(&page), vec!["0", "0"]);
    assert!(page.borrow().badges().all(ElementNode::is_hidden));
}

#[test]
fn test_badges_follow_cart_changes() {
    let page = page();
    let mut store = CartStore::new(MemoryStore::new());
    store.subscribe(CartBadge::new(Rc::clone(&page)));

    store.add_to_cart(product(1, 10), 2).unwrap();
    assert_eq!(badge_texts(&page), vec!["2", "2"]);
    assert!(page.borrow().badges().all(|e| !e.is_hidden()));

    store.update_qty(&ProductId::new(1), 5).unwrap();
    assert_eq!(badge_texts(&page), vec!["5", "5"]);

    store.remove_from_cart(&ProductId::new(1)).unwrap();
    assert_eq!(badge_texts(&page), vec!["0", "0"]);
    assert!(page.borrow().badges().all(ElementNode::is_hidden));

    // Unmarked elements are never touched.
    assert_eq!(page.borrow().element(1).unwrap().text(), "");
}

#[test]
fn test_wishlist_toggle_leaves_badges_alone() {
    let page = page();
    let mut store = CartStore::new(MemoryStore::new());
    store.subscribe(CartBadge::new(Rc::clone(&page)));

    store.toggle_wishlist(product(1, 10)).unwrap();

    assert_eq!(badge_texts(&page), vec!["", ""]);
}
