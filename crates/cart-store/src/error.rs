//! Store error types.

use servicecart_core::CartError;
use thiserror::Error;

/// Errors that can occur when persisting the cart.
///
/// Reads never surface here: a missing or corrupt record reads as an
/// empty cart.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to write the cart record.
    #[error("failed to write cart record: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the cart record.
    #[error("failed to serialize cart record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Domain-level failure (currency mismatch, overflow).
    #[error(transparent)]
    Domain(#[from] CartError),
}
