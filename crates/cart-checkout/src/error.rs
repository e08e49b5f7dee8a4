//! Checkout error taxonomy.
//!
//! Every variant is terminal for the current session; none triggers an
//! automatic retry, and the cart is left intact on all of them so the
//! user can retry the whole checkout from a clean state.

use thiserror::Error;

/// Errors surfaced by the checkout flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The provider SDK could not be acquired.
    #[error("payment SDK failed to load: {0}")]
    SdkLoad(String),

    /// Order creation was rejected.
    #[error("order could not be created: {0}")]
    OrderCreate(String),

    /// Capture of an approved order failed.
    #[error("payment capture failed: {0}")]
    Capture(String),

    /// Opaque provider-side failure.
    #[error("payment provider error: {0}")]
    Provider(String),

    /// The user abandoned the flow.
    #[error("payment cancelled")]
    UserCancelled,

    /// The cart could not be updated after a successful capture.
    #[error("cart update failed after capture: {0}")]
    CartUpdate(String),
}
