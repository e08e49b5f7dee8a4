//! Checkout controller for ServiceCart.
//!
//! Converts the current cart into a payable order through an external
//! payment provider and drives the approve → capture flow:
//!
//! - **SdkLoader**: memoized async acquisition of the provider SDK
//! - **CheckoutController**: the session state machine (mount, activate,
//!   approve/cancel/fail, unmount, sync)
//! - **OrderPayload**: the provider's purchase-unit shape, every amount
//!   formatted independently to two decimals
//! - **SandboxProvider**: deterministic provider for the `"test"` client id
//!
//! A successful capture clears the cart and surfaces a confirmation with
//! the captured amount; every failure leaves the cart untouched and is
//! terminal for the session. Nothing here is retried automatically.

pub mod config;
pub mod controller;
pub mod error;
pub mod order;
pub mod provider;
pub mod sandbox;
pub mod sdk;
pub mod session;
pub mod surface;

pub use config::CheckoutConfig;
pub use controller::{ApprovalTicket, CheckoutController};
pub use error::CheckoutError;
pub use order::{OrderLine, OrderPayload};
pub use provider::{CaptureResult, OrderId, PaymentProvider};
pub use sandbox::{SandboxProvider, SandboxSource};
pub use sdk::{SdkLoader, SdkSource};
pub use session::{CheckoutSession, CheckoutStatus};
pub use surface::{ButtonHost, ButtonInstance, ButtonStyle};
