//! Cart domain types and logic for ServiceCart.
//!
//! This crate provides the core types of the cart & checkout subsystem:
//!
//! - **Money**: fixed two-decimal monetary values in integer minor units
//! - **Cart**: an insertion-ordered list of line items with merge-by-id
//!   semantics and derived count/subtotal
//!
//! # Example
//!
//! ```rust
//! use servicecart_core::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add(CartItem::new("p1", "Sticker Pack", Money::from_decimal(4.99, Currency::USD)));
//! cart.set_qty(&ItemId::new("p1"), 3);
//!
//! let subtotal = cart.subtotal_in(Currency::USD).unwrap();
//! assert_eq!(subtotal.format_amount(), "14.97");
//! ```

pub mod error;
pub mod item;
pub mod money;

pub use error::CartError;
pub use item::{Cart, CartItem, ItemId};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::item::{Cart, CartItem, ItemId};
    pub use crate::money::{Currency, Money};
}
