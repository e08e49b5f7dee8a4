//! Cart domain error types.

use thiserror::Error;

/// Errors that can occur in cart domain operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
