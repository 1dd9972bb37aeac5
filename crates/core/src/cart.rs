//! Shopping cart state.
//!
//! The cart is a plain value type mutated through a small set of operations.
//! All mutations keep two invariants: line item ids are unique within a cart,
//! and every quantity is at least 1 (an item whose quantity would drop to
//! zero is removed instead). Operations never fail; malformed input is
//! normalized at the [`NewLineItem`] boundary rather than rejected.
//!
//! Persistence is not this module's concern - the cart serializes to a
//! `{ "items": [...] }` snapshot and the storefront decides where that
//! snapshot lives.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog identifier, unique within a cart.
    pub id: String,
    /// Display name, captured when the item is added.
    pub title: String,
    /// Unit price, captured when the item is added. Never re-checked against
    /// the live catalog.
    pub price: Decimal,
    /// Display asset for the line, if the catalog entry has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Units of this product. Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Price for the whole line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Input for adding a product to the cart.
///
/// Normalization happens here, once: a missing *or zero* quantity becomes 1,
/// and a negative price is clamped to zero. The rest of the cart code can
/// then assume well-formed line items.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Display asset, if any.
    pub image: Option<String>,
    /// Units to add. `None` and `Some(0)` both mean 1.
    pub quantity: Option<u32>,
}

/// The visitor's cart: line items in insertion order.
///
/// Serializes to the snapshot shape `{ "items": [...] }`. Unknown fields in
/// a stored snapshot are ignored on load so the shape can grow later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Line items, first-added first.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a product to the cart.
    ///
    /// If an item with the same id is already present its quantity is
    /// incremented; otherwise a new line is appended. A requested quantity of
    /// zero collapses to 1, same as an unspecified one.
    pub fn add_item(&mut self, item: NewLineItem) {
        let quantity = match item.quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        };

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem {
                id: item.id,
                title: item.title,
                price: item.price.max(Decimal::ZERO),
                image: item.image,
                quantity,
            });
        }
    }

    /// Set the quantity of a line item.
    ///
    /// A quantity of zero removes the item entirely. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    /// Remove a line item. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
