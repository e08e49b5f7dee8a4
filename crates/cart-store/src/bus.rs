//! In-process change-propagation bus.
//!
//! Local notifications are delivered synchronously: every handler runs
//! before the mutating call returns. The signal carries no cart data;
//! handlers re-read the store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

/// Where a change signal originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A mutation performed through this process's store.
    Local,
    /// The persisted record changed underneath us (another process).
    External,
}

/// The change signal delivered to subscribers.
#[derive(Debug, Clone, Copy)]
pub struct CartChanged {
    pub origin: ChangeOrigin,
}

type Handler = Arc<dyn Fn(CartChanged) + Send + Sync>;

/// Publish/subscribe bus for cart change signals.
#[derive(Clone)]
pub struct SyncBus {
    inner: Arc<BusInner>,
}

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(u64, Handler)>>,
}

impl SyncBus {
    /// Create a new bus with no subscribers.
    pub fn new() -> Self {
        debug!("cart sync bus initialized");
        Self {
            inner: Arc::new(BusInner::default()),
        }
    }

    /// Register a handler for subsequent change signals.
    ///
    /// The handler is not invoked at subscribe time; callers perform
    /// their initial read themselves. Dropping the returned
    /// [`Subscription`] unsubscribes.
    pub fn subscribe(&self, handler: impl Fn(CartChanged) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.lock_handlers().push((id, Arc::new(handler)));
        Subscription {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    /// Deliver a change signal to every subscriber before returning.
    pub fn notify(&self, origin: ChangeOrigin) {
        // Snapshot under the lock so handlers may subscribe/unsubscribe.
        let snapshot: Vec<Handler> = self
            .lock_handlers()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in snapshot {
            handler(CartChanged { origin });
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.lock_handlers().len()
    }

    fn lock_handlers(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Handler)>> {
        self.inner
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered subscriber; unsubscribes on drop.
pub struct Subscription {
    inner: Arc<BusInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut handlers = self
            .inner
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        handlers.retain(|(id, _)| *id != self.id);
    }
}
