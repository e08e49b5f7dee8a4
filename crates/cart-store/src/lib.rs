//! Persisted cart store and change propagation for ServiceCart.
//!
//! [`CartStore`] owns the single persisted cart record. Every mutation is
//! a whole-record overwrite followed by exactly one synchronous change
//! notification on the [`SyncBus`]. A file watcher raises the same signal
//! when another process sharing the store writes, so every mounted
//! consumer, local or not, re-derives from the same source of truth.
//!
//! # Example
//!
//! ```rust,no_run
//! use servicecart_core::prelude::*;
//! use servicecart_store::{CartStore, StoreConfig};
//!
//! let store = CartStore::open(StoreConfig::new("/tmp/servicecart"))?;
//! let _sub = store.subscribe(|_change| {
//!     // re-read, never trust the signal payload
//! });
//! store.add(CartItem::new("p1", "Sticker Pack", Money::from_decimal(4.99, Currency::USD)))?;
//! # Ok::<(), servicecart_store::StoreError>(())
//! ```

pub mod bus;
pub mod error;
pub mod store;
mod watch;

pub use bus::{CartChanged, ChangeOrigin, Subscription, SyncBus};
pub use error::StoreError;
pub use store::{CartStore, StoreConfig, CART_STORE_KEY};
