//! Payment provider boundary.
//!
//! The provider is consumed strictly through its create-order and
//! capture-order contract; its order backend is never reimplemented.
//! There are no timeouts here: calls settle or fail on the provider's
//! own timing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use servicecart_core::Money;

use crate::error::CheckoutError;
use crate::order::OrderPayload;

/// Opaque provider order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a capture call.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    /// Provider payment identifier.
    pub payment_id: String,
    /// The captured amount.
    pub amount: Money,
}

/// The external payment provider's order contract.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an order for the given payload.
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderId, CheckoutError>;

    /// Finalize a payment the user has approved.
    async fn capture_order(&self, order_id: &OrderId) -> Result<CaptureResult, CheckoutError>;
}
