//! Checkout session state.
//!
//! The session is ephemeral: scoped to one mounted checkout surface,
//! never persisted, reset to `Idle` whenever the surface is rebuilt.

use servicecart_core::Money;

use crate::error::CheckoutError;
use crate::provider::OrderId;

/// Checkout session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStatus {
    /// Nothing mounted, or cart not eligible (subtotal is zero).
    Idle,
    /// Acquiring the provider SDK.
    Loading,
    /// Button surface rendered, waiting for the user.
    Ready,
    /// Building and submitting the order.
    Creating,
    /// Order created, waiting for the provider's approval callback.
    AwaitingApproval,
    /// Capture call in flight.
    Capturing,
    /// Capture resolved; cart cleared.
    Succeeded,
    /// User abandoned the flow.
    Cancelled,
    /// Terminal failure; no automatic retry.
    Failed,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Idle => "idle",
            CheckoutStatus::Loading => "loading",
            CheckoutStatus::Ready => "ready",
            CheckoutStatus::Creating => "creating",
            CheckoutStatus::AwaitingApproval => "awaiting_approval",
            CheckoutStatus::Capturing => "capturing",
            CheckoutStatus::Succeeded => "succeeded",
            CheckoutStatus::Cancelled => "cancelled",
            CheckoutStatus::Failed => "failed",
        }
    }

    /// Terminal states end the session; only a fresh mount leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutStatus::Succeeded | CheckoutStatus::Cancelled | CheckoutStatus::Failed
        )
    }
}

/// One checkout attempt over a fixed cart snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    /// Current status.
    pub status: CheckoutStatus,
    /// The amount this session was mounted for.
    pub amount: Money,
    /// Provider order id, once created.
    pub order_id: Option<OrderId>,
    /// Success confirmation or failure message for the user.
    pub message: Option<String>,
}

impl CheckoutSession {
    /// Fresh idle session for the given amount.
    pub fn new(amount: Money) -> Self {
        Self {
            status: CheckoutStatus::Idle,
            amount,
            order_id: None,
            message: None,
        }
    }

    /// Record a successful capture.
    pub(crate) fn succeed(&mut self, message: String) {
        self.status = CheckoutStatus::Succeeded;
        self.message = Some(message);
    }

    /// Record a terminal error. A cancellation lands in `Cancelled`,
    /// everything else in `Failed`.
    pub(crate) fn apply_error(&mut self, error: &CheckoutError) {
        self.status = match error {
            CheckoutError::UserCancelled => CheckoutStatus::Cancelled,
            _ => CheckoutStatus::Failed,
        };
        self.message = Some(error.to_string());
    }
}
