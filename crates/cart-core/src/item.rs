//! Cart and line item types.
//!
//! The cart is an insertion-ordered list of line items. Item identity is
//! the `id` field: adding an item whose id is already present merges
//! quantities instead of appending a duplicate. Quantity is clamped to a
//! minimum of 1 by the cart, not by callers; removal is a separate
//! explicit operation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CartError;
use crate::money::{Currency, Money};

/// Stable identity key for a line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Create an ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A purchasable line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Stable identity key.
    pub id: ItemId,
    /// Optional stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Quantity, always >= 1 once stored in a cart.
    pub qty: i64,
}

impl CartItem {
    /// Create a line item with the default quantity of 1.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            sku: None,
            name: name.into(),
            price,
            qty: 1,
        }
    }

    /// Set the SKU.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Set the quantity.
    pub fn with_qty(mut self, qty: i64) -> Self {
        self.qty = qty;
        self
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CartError> {
        self.price.try_mul(self.qty)
    }
}

/// An insertion-ordered collection of line items.
///
/// Serializes as a plain item array, which is the persisted layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging quantities when the id already exists.
    ///
    /// Incoming quantity is clamped to a minimum of 1 and a negative
    /// price is clamped to zero, so the stored cart always satisfies
    /// `qty >= 1` and `price >= 0`.
    pub fn add(&mut self, mut item: CartItem) {
        item.qty = item.qty.max(1);
        if item.price.amount_cents < 0 {
            item.price = Money::zero(item.price.currency);
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.qty = existing.qty.saturating_add(item.qty);
        } else {
            self.items.push(item);
        }
    }

    /// Set the quantity of an existing item, clamped to a minimum of 1.
    ///
    /// Returns false (and changes nothing) when the id is not present.
    pub fn set_qty(&mut self, id: &ItemId, qty: i64) -> bool {
        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.qty = qty.max(1);
                true
            }
            None => false,
        }
    }

    /// Remove an item. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count (sum of quantities).
    pub fn count(&self) -> i64 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Sum of price * qty across all items, in the given currency.
    pub fn subtotal_in(&self, currency: Currency) -> Result<Money, CartError> {
        let mut total = Money::zero(currency);
        for item in &self.items {
            total = total.try_add(&item.line_total()?)?;
        }
        Ok(total)
    }

    /// Get an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Items as a slice, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}
