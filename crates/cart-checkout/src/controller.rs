//! The checkout controller.
//!
//! Owns one [`CheckoutSession`] per mounted surface and drives it
//! through load → render → create → approve → capture. The provider's
//! approval, cancellation, and error callbacks are the only entry
//! points back into the machine after activation; they carry an
//! [`ApprovalTicket`] so an outcome arriving after the surface was
//! rebuilt or torn down is ignored instead of being applied to a
//! session it does not belong to.

use std::sync::Arc;

use tracing::{debug, info};

use servicecart_core::Money;
use servicecart_store::CartStore;

use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::order::OrderPayload;
use crate::provider::{OrderId, PaymentProvider};
use crate::sdk::{SdkLoader, SdkSource};
use crate::session::{CheckoutSession, CheckoutStatus};
use crate::surface::{ButtonHost, ButtonInstance, ButtonStyle};

/// Token tying a provider callback to the mount that issued it.
#[derive(Debug, Clone)]
pub struct ApprovalTicket {
    generation: u64,
    order_id: OrderId,
}

impl ApprovalTicket {
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }
}

/// Drives the checkout surface for one cart.
pub struct CheckoutController {
    store: Arc<CartStore>,
    loader: SdkLoader,
    config: CheckoutConfig,
    session: CheckoutSession,
    host: ButtonHost,
    sdk: Option<Arc<dyn PaymentProvider>>,
    mount_key: Option<String>,
    generation: u64,
}

impl CheckoutController {
    pub fn new(store: Arc<CartStore>, source: Arc<dyn SdkSource>, config: CheckoutConfig) -> Self {
        let session = CheckoutSession::new(Money::zero(config.currency));
        Self {
            store,
            loader: SdkLoader::new(source),
            config,
            session,
            host: ButtonHost::new(),
            sdk: None,
            mount_key: None,
            generation: 0,
        }
    }

    /// The current session.
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// The button host (empty when the cart is not eligible).
    pub fn host(&self) -> &ButtonHost {
        &self.host
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Mount the checkout surface for the current cart.
    ///
    /// With a zero subtotal the session stays `Idle` and no payment
    /// control is rendered. Otherwise the SDK is acquired (`Loading`)
    /// and the button surface rendered into a cleared host (`Ready`);
    /// an acquisition failure is terminal (`Failed`) and leaves the
    /// host empty.
    pub async fn mount(&mut self) {
        self.generation += 1;
        self.host.clear();
        self.sdk = None;

        let amount = self.store.subtotal();
        self.session = CheckoutSession::new(amount);
        self.mount_key = Some(self.snapshot_key());

        if !amount.is_positive() {
            debug!("cart not eligible for checkout, withholding payment controls");
            return;
        }

        self.session.status = CheckoutStatus::Loading;
        match self.loader.load().await {
            Ok(sdk) => {
                self.sdk = Some(sdk);
                self.host
                    .attach(ButtonInstance::new(ButtonStyle::from_config(&self.config)));
                self.session.status = CheckoutStatus::Ready;
                debug!("checkout surface ready for {}", amount);
            }
            Err(e) => {
                self.session.apply_error(&e);
            }
        }
    }

    /// User activated the button: build the order and submit it.
    ///
    /// On success the session awaits the provider's approval callback
    /// and the returned ticket is the handle the callbacks must present.
    pub async fn activate(&mut self) -> Result<ApprovalTicket, CheckoutError> {
        if self.session.status != CheckoutStatus::Ready {
            return Err(CheckoutError::OrderCreate(format!(
                "checkout surface is not ready (status: {})",
                self.session.status.as_str()
            )));
        }
        let sdk = self
            .sdk
            .clone()
            .ok_or_else(|| CheckoutError::OrderCreate("no SDK instance".to_string()))?;

        self.session.status = CheckoutStatus::Creating;
        let payload = match OrderPayload::from_cart(&self.store.read(), &self.config) {
            Ok(payload) => payload,
            Err(e) => {
                self.session.apply_error(&e);
                return Err(e);
            }
        };

        match sdk.create_order(&payload).await {
            Ok(order_id) => {
                self.session.order_id = Some(order_id.clone());
                self.session.status = CheckoutStatus::AwaitingApproval;
                Ok(ApprovalTicket {
                    generation: self.generation,
                    order_id,
                })
            }
            Err(e) => {
                self.session.apply_error(&e);
                Err(e)
            }
        }
    }

    /// Provider approval callback: capture and apply the success effect.
    ///
    /// On capture success the cart is cleared and a confirmation with
    /// the captured amount is surfaced; on failure the cart is left
    /// untouched. A stale ticket is ignored entirely.
    pub async fn approve(&mut self, ticket: &ApprovalTicket) -> Result<(), CheckoutError> {
        if self.is_stale(ticket) {
            return Ok(());
        }

        self.session.status = CheckoutStatus::Capturing;
        let sdk = self
            .sdk
            .clone()
            .ok_or_else(|| CheckoutError::Capture("no SDK instance".to_string()))?;

        match sdk.capture_order(&ticket.order_id).await {
            Ok(result) => {
                if let Err(e) = self.store.clear() {
                    let err = CheckoutError::CartUpdate(e.to_string());
                    self.session.apply_error(&err);
                    return Err(err);
                }
                info!(
                    "captured {} for order {}",
                    result.amount, ticket.order_id
                );
                self.session.succeed(format!(
                    "Payment of {} received (ref {}). Thank you!",
                    result.amount.display(),
                    result.payment_id
                ));
                self.host.clear();
                Ok(())
            }
            Err(e) => {
                self.session.apply_error(&e);
                Err(e)
            }
        }
    }

    /// Provider cancellation callback: the user abandoned the flow.
    /// Cart is untouched.
    pub fn cancel(&mut self, ticket: &ApprovalTicket) {
        if self.is_stale(ticket) {
            return;
        }
        self.session.apply_error(&CheckoutError::UserCancelled);
    }

    /// Provider error callback for failures outside create/capture.
    /// Cart is untouched.
    pub fn fail(&mut self, ticket: &ApprovalTicket, error: CheckoutError) {
        if self.is_stale(ticket) {
            return;
        }
        self.session.apply_error(&error);
    }

    /// Tear down the surface: release the rendered button instance and
    /// invalidate outstanding tickets.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.host.clear();
        self.sdk = None;
        self.session = CheckoutSession::new(Money::zero(self.config.currency));
        self.mount_key = None;
    }

    /// Remount from scratch when the cart or configuration changed
    /// since the last mount. Returns whether a restart happened.
    ///
    /// There is no in-place diffing of an in-flight session: any change
    /// restarts the machine from `Idle`/`Loading`.
    pub async fn sync(&mut self) -> bool {
        let key = self.snapshot_key();
        if self.mount_key.as_ref() == Some(&key) {
            return false;
        }
        self.mount().await;
        true
    }

    /// Replace the configuration; the next [`sync`](Self::sync) restarts.
    pub fn set_config(&mut self, config: CheckoutConfig) {
        self.config = config;
    }

    fn is_stale(&self, ticket: &ApprovalTicket) -> bool {
        let stale = ticket.generation != self.generation;
        if stale {
            debug!(
                "ignoring callback for order {} from a torn-down surface",
                ticket.order_id
            );
        }
        stale
    }

    /// Cart contents plus config fingerprint; a change in either
    /// invalidates the mounted session.
    fn snapshot_key(&self) -> String {
        let cart = self.store.read();
        let items: String = cart
            .iter()
            .map(|i| format!("{}x{}@{};", i.id, i.qty, i.price.amount_cents))
            .collect();
        format!("{}|{}", items, self.config.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CaptureResult;
    use crate::sandbox::SandboxSource;
    use async_trait::async_trait;
    use servicecart_core::{CartItem, Currency, ItemId};
    use servicecart_store::StoreConfig;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> Arc<CartStore> {
        Arc::new(CartStore::open(StoreConfig::new(dir.path()).with_watch(false)).unwrap())
    }

    fn sticker_pack() -> CartItem {
        CartItem::new("p1", "Sticker Pack", Money::from_decimal(4.99, Currency::USD))
    }

    fn sandbox_controller(store: Arc<CartStore>) -> CheckoutController {
        CheckoutController::new(
            store,
            Arc::new(SandboxSource::new()),
            CheckoutConfig::default(),
        )
    }

    struct FailingSource;

    #[async_trait]
    impl crate::sdk::SdkSource for FailingSource {
        async fn fetch(&self) -> Result<Arc<dyn PaymentProvider>, CheckoutError> {
            Err(CheckoutError::SdkLoad("network error".to_string()))
        }
    }

    struct DecliningProvider;

    #[async_trait]
    impl PaymentProvider for DecliningProvider {
        async fn create_order(&self, _payload: &OrderPayload) -> Result<OrderId, CheckoutError> {
            Ok(OrderId::new("ord_test_1"))
        }

        async fn capture_order(&self, _id: &OrderId) -> Result<CaptureResult, CheckoutError> {
            Err(CheckoutError::Capture("card declined".to_string()))
        }
    }

    struct FixedSource(Arc<dyn PaymentProvider>);

    #[async_trait]
    impl crate::sdk::SdkSource for FixedSource {
        async fn fetch(&self) -> Result<Arc<dyn PaymentProvider>, CheckoutError> {
            Ok(Arc::clone(&self.0))
        }
    }

    #[tokio::test]
    async fn test_empty_cart_withholds_payment_controls() {
        let dir = TempDir::new().unwrap();
        let mut controller = sandbox_controller(open_store(&dir));

        controller.mount().await;

        assert_eq!(controller.session().status, CheckoutStatus::Idle);
        assert!(controller.host().is_empty());
    }

    #[tokio::test]
    async fn test_mount_renders_single_button() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();
        let mut controller = sandbox_controller(Arc::clone(&store));

        controller.mount().await;
        assert_eq!(controller.session().status, CheckoutStatus::Ready);
        assert_eq!(controller.host().instance_count(), 1);

        // A second mount clears before rendering; nothing stacks.
        controller.mount().await;
        assert_eq!(controller.host().instance_count(), 1);
    }

    #[tokio::test]
    async fn test_sdk_load_failure_is_terminal_and_cart_intact() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();
        let before = store.read();

        let mut controller = CheckoutController::new(
            Arc::clone(&store),
            Arc::new(FailingSource),
            CheckoutConfig::default(),
        );
        controller.mount().await;

        assert_eq!(controller.session().status, CheckoutStatus::Failed);
        assert!(controller.host().is_empty());
        assert_eq!(store.read(), before);
    }

    #[tokio::test]
    async fn test_full_capture_flow_clears_cart() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();
        store.set_qty(&ItemId::new("p1"), 3).unwrap();
        assert_eq!(store.subtotal().format_amount(), "14.97");

        let mut controller = sandbox_controller(Arc::clone(&store));
        controller.mount().await;

        let ticket = controller.activate().await.unwrap();
        assert_eq!(
            controller.session().status,
            CheckoutStatus::AwaitingApproval
        );

        controller.approve(&ticket).await.unwrap();
        assert_eq!(controller.session().status, CheckoutStatus::Succeeded);
        assert!(store.read().is_empty());

        let message = controller.session().message.as_deref().unwrap();
        assert!(message.contains("$14.97"));
        assert!(controller.host().is_empty());
    }

    #[tokio::test]
    async fn test_capture_failure_leaves_cart() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();
        let before = store.read();

        let mut controller = CheckoutController::new(
            Arc::clone(&store),
            Arc::new(FixedSource(Arc::new(DecliningProvider))),
            CheckoutConfig::default(),
        );
        controller.mount().await;
        let ticket = controller.activate().await.unwrap();

        assert!(controller.approve(&ticket).await.is_err());
        assert_eq!(controller.session().status, CheckoutStatus::Failed);
        assert_eq!(store.read(), before);
    }

    #[tokio::test]
    async fn test_cancel_leaves_cart() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();

        let mut controller = sandbox_controller(Arc::clone(&store));
        controller.mount().await;
        let ticket = controller.activate().await.unwrap();

        controller.cancel(&ticket);
        assert_eq!(controller.session().status, CheckoutStatus::Cancelled);
        assert_eq!(store.read().count(), 1);
    }

    #[tokio::test]
    async fn test_stale_ticket_is_ignored_after_unmount() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();

        let mut controller = sandbox_controller(Arc::clone(&store));
        controller.mount().await;
        let ticket = controller.activate().await.unwrap();

        controller.unmount();
        assert!(controller.host().is_empty());

        // Late success must not clear the cart or touch the session.
        controller.approve(&ticket).await.unwrap();
        assert_eq!(controller.session().status, CheckoutStatus::Idle);
        assert_eq!(store.read().count(), 1);
    }

    #[tokio::test]
    async fn test_stale_ticket_is_ignored_after_remount() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();

        let mut controller = sandbox_controller(Arc::clone(&store));
        controller.mount().await;
        let stale = controller.activate().await.unwrap();

        // Cart changes, surface restarts, the old ticket is dead.
        store.add(CartItem::new("p2", "T-Shirt", Money::from_decimal(19.0, Currency::USD)))
            .unwrap();
        assert!(controller.sync().await);
        assert_eq!(controller.session().status, CheckoutStatus::Ready);

        controller.cancel(&stale);
        assert_eq!(controller.session().status, CheckoutStatus::Ready);
    }

    #[tokio::test]
    async fn test_sync_is_noop_without_changes() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();

        let mut controller = sandbox_controller(Arc::clone(&store));
        controller.mount().await;
        assert!(!controller.sync().await);
    }

    #[tokio::test]
    async fn test_sync_restarts_on_config_change() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.add(sticker_pack()).unwrap();

        let mut controller = sandbox_controller(Arc::clone(&store));
        controller.mount().await;

        let mut config = controller.config().clone();
        config.button_height = Some(55);
        controller.set_config(config);

        assert!(controller.sync().await);
        assert_eq!(
            controller.host().instance_count(),
            1
        );
    }

    #[tokio::test]
    async fn test_activate_requires_ready() {
        let dir = TempDir::new().unwrap();
        let mut controller = sandbox_controller(open_store(&dir));
        controller.mount().await; // empty cart, stays Idle

        assert!(matches!(
            controller.activate().await,
            Err(CheckoutError::OrderCreate(_))
        ));
    }
}
