//! Cart count badge.
//!
//! A page marks every element that should show the cart count with the
//! [`BADGE_ATTRIBUTE`] attribute. [`CartBadge`] subscribes to the store and,
//! on every total change, writes the count into each marked element and adds
//! the [`HIDDEN_CLASS`] class while the count is zero.
//!
//! [`Page`] is a minimal element tree implementing [`BadgeHost`], used for
//! headless rendering and tests. Browser hosts implement the same traits over
//! their real elements.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::events::{CartEvent, CartObserver};

/// Attribute that marks an element as a cart badge.
pub const BADGE_ATTRIBUTE: &str = "data-cart-badge";

/// Class applied to badges while the cart is empty.
pub const HIDDEN_CLASS: &str = "hidden";

/// An element whose text and classes can be updated.
pub trait BadgeElement {
    /// Replace the element's text content.
    fn set_text(&mut self, text: &str);

    /// Add `class` when `enabled` is true, remove it otherwise.
    fn toggle_class(&mut self, class: &str, enabled: bool);
}

/// Something that contains cart badge elements.
pub trait BadgeHost {
    /// Call `apply` on every element marked with [`BADGE_ATTRIBUTE`].
    fn for_each_badge(&mut self, apply: &mut dyn FnMut(&mut dyn BadgeElement));
}

impl<H: BadgeHost> BadgeHost for Rc<RefCell<H>> {
    fn for_each_badge(&mut self, apply: &mut dyn FnMut(&mut dyn BadgeElement)) {
        self.borrow_mut().for_each_badge(apply);
    }
}

/// Observer that mirrors the cart's total quantity into badge elements.
#[derive(Debug, Clone, Default)]
pub struct CartBadge<H> {
    host: H,
}

impl<H: BadgeHost> CartBadge<H> {
    /// Create a badge updater for the elements in `host`.
    pub const fn new(host: H) -> Self {
        Self { host }
    }

    /// Write `total_qty` into every badge element.
    pub fn render(&mut self, total_qty: u64) {
        let text = total_qty.to_string();
        let empty = total_qty == 0;
        self.host.for_each_badge(&mut |element: &mut dyn BadgeElement| {
            element.set_text(&text);
            element.toggle_class(HIDDEN_CLASS, empty);
        });
    }

    /// Returns the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Consumes the badge and returns the host.
    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: BadgeHost> CartObserver for CartBadge<H> {
    fn on_event(&mut self, event: &CartEvent) {
        if let CartEvent::TotalQtyChanged { total_qty } = *event {
            self.render(total_qty);
        }
    }
}

/// A headless element: attributes, text content, and a class list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
}

impl ElementNode {
    /// Create an element with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element marked as a cart badge.
    #[must_use]
    pub fn badge() -> Self {
        Self::new().with_attribute(BADGE_ATTRIBUTE, "")
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Returns true if the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns true if the class is present.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Returns the text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the element carries [`HIDDEN_CLASS`].
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS)
    }
}

impl BadgeElement for ElementNode {
    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn toggle_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}

/// A flat list of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: Vec<ElementNode>,
}

impl Page {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, returning its index.
    pub fn push(&mut self, element: ElementNode) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn element(&self, index: usize) -> Option<&ElementNode> {
        self.elements.get(index)
    }

    /// Iterate over the elements marked as cart badges.
    pub fn badges(&self) -> impl Iterator<Item = &ElementNode> {
        self.elements
            .iter()
            .filter(|e| e.has_attribute(BADGE_ATTRIBUTE))
    }
}

impl BadgeHost for Page {
    fn for_each_badge(&mut self, apply: &mut dyn FnMut(&mut dyn BadgeElement)) {
        for element in self
            .elements
            .iter_mut()
            .filter(|e| e.has_attribute(BADGE_ATTRIBUTE))
        {
            apply(element);
        }
    }
}
