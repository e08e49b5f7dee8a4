//! Memoized provider SDK acquisition.
//!
//! Acquiring the SDK has three outcomes: already available, newly
//! acquired, or failed. Concurrent requesters share one in-flight
//! attempt. A failure is not cached, so the next mount makes a fresh
//! attempt; a success is kept for the life of the loader.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::CheckoutError;
use crate::provider::PaymentProvider;

/// Where the SDK comes from: a real script fetch in production, a stub
/// in tests, the sandbox for the `"test"` client id.
#[async_trait]
pub trait SdkSource: Send + Sync {
    async fn fetch(&self) -> Result<Arc<dyn PaymentProvider>, CheckoutError>;
}

/// Deduplicating loader over an [`SdkSource`].
pub struct SdkLoader {
    source: Arc<dyn SdkSource>,
    cell: OnceCell<Arc<dyn PaymentProvider>>,
}

impl SdkLoader {
    pub fn new(source: Arc<dyn SdkSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Acquire the SDK, sharing any attempt already in flight.
    pub async fn load(&self) -> Result<Arc<dyn PaymentProvider>, CheckoutError> {
        let provider = self
            .cell
            .get_or_try_init(|| async {
                debug!("acquiring payment SDK");
                self.source.fetch().await
            })
            .await?;
        Ok(Arc::clone(provider))
    }

    /// Whether a successful acquisition is cached.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
