//! Order payload construction.
//!
//! Mirrors the provider's purchase-unit shape: amounts travel as fixed
//! two-decimal strings, quantity as a string. The total, the item_total
//! breakdown, and each line's unit amount are formatted independently
//! of one another; nothing is reconciled afterwards.

use serde::Serialize;

use servicecart_core::{Cart, Currency};

use crate::config::CheckoutConfig;
use crate::error::CheckoutError;

/// Item category reported to the provider.
const ITEM_CATEGORY: &str = "DIGITAL_GOODS";

/// One line of the order breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: String,
    pub unit_amount: String,
    pub category: String,
}

/// The order sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    pub description: String,
    pub currency_code: String,
    pub total: String,
    /// Sum-of-lines breakdown, formatted independently of `total`.
    pub item_total: String,
    pub items: Vec<OrderLine>,
}

impl OrderPayload {
    /// Build an order from the cart contents.
    ///
    /// Fails with [`CheckoutError::OrderCreate`] when the cart cannot be
    /// priced (currency mismatch, overflow) or is empty.
    pub fn from_cart(cart: &Cart, config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::OrderCreate("cart is empty".to_string()));
        }

        let subtotal = cart
            .subtotal_in(config.currency)
            .map_err(|e| CheckoutError::OrderCreate(e.to_string()))?;

        let items = cart
            .iter()
            .map(|item| OrderLine {
                name: item.name.clone(),
                quantity: item.qty.to_string(),
                unit_amount: item.price.format_amount(),
                category: ITEM_CATEGORY.to_string(),
            })
            .collect();

        Ok(Self {
            description: config.description.clone(),
            currency_code: config.currency.code().to_string(),
            total: subtotal.format_amount(),
            item_total: subtotal.format_amount(),
            items,
        })
    }

    /// The configured currency, parsed back from the code.
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_code(&self.currency_code)
    }
}
