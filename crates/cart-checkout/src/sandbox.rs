//! Sandbox payment provider.
//!
//! Used when the `"test"` client id is configured: orders and captures
//! succeed deterministically without any external calls, and the
//! captured amount echoes the order total.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use servicecart_core::Money;

use crate::error::CheckoutError;
use crate::order::OrderPayload;
use crate::provider::{CaptureResult, OrderId, PaymentProvider};
use crate::sdk::SdkSource;

/// In-process stand-in for the real provider.
#[derive(Default)]
pub struct SandboxProvider {
    next_id: AtomicU64,
    orders: Mutex<HashMap<OrderId, Money>>,
}

impl SandboxProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentProvider for SandboxProvider {
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderId, CheckoutError> {
        let currency = payload
            .currency()
            .ok_or_else(|| CheckoutError::OrderCreate(format!(
                "unknown currency code: {}",
                payload.currency_code
            )))?;
        let total: f64 = payload
            .total
            .parse()
            .map_err(|_| CheckoutError::OrderCreate(format!("bad total: {}", payload.total)))?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order_id = OrderId::new(format!("ord_sbx_{n:06}"));
        debug!("sandbox order {order_id} created for {total}");

        self.orders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(order_id.clone(), Money::from_decimal(total, currency));
        Ok(order_id)
    }

    async fn capture_order(&self, order_id: &OrderId) -> Result<CaptureResult, CheckoutError> {
        let amount = self
            .orders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(order_id)
            .ok_or_else(|| CheckoutError::Capture(format!("unknown order: {order_id}")))?;

        Ok(CaptureResult {
            payment_id: format!("pay_sbx_{}", order_id.as_str().trim_start_matches("ord_sbx_")),
            amount,
        })
    }
}

/// [`SdkSource`] yielding a shared sandbox provider.
#[derive(Default)]
pub struct SandboxSource {
    provider: Arc<SandboxProvider>,
}

impl SandboxSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SdkSource for SandboxSource {
    async fn fetch(&self) -> Result<Arc<dyn PaymentProvider>, CheckoutError> {
        Ok(Arc::clone(&self.provider) as Arc<dyn PaymentProvider>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckoutConfig;
    use servicecart_core::{Cart, CartItem, Currency};

    fn payload() -> OrderPayload {
        let mut cart = Cart::new();
        cart.add(
            CartItem::new("p1", "Sticker Pack", Money::from_decimal(4.99, Currency::USD))
                .with_qty(3),
        );
        OrderPayload::from_cart(&cart, &CheckoutConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_capture_echoes_total() {
        let provider = SandboxProvider::new();
        let order_id = provider.create_order(&payload()).await.unwrap();
        let result = provider.capture_order(&order_id).await.unwrap();

        assert_eq!(result.amount, Money::new(1497, Currency::USD));
        assert!(result.payment_id.starts_with("pay_sbx_"));
    }

    #[tokio::test]
    async fn test_capture_unknown_order_fails() {
        let provider = SandboxProvider::new();
        let result = provider.capture_order(&OrderId::new("ord_sbx_999999")).await;
        assert!(matches!(result, Err(CheckoutError::Capture(_))));
    }

    #[tokio::test]
    async fn test_capture_is_single_use() {
        let provider = SandboxProvider::new();
        let order_id = provider.create_order(&payload()).await.unwrap();
        provider.capture_order(&order_id).await.unwrap();
        assert!(provider.capture_order(&order_id).await.is_err());
    }
}
