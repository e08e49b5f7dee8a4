//! The persisted cart store.
//!
//! One keyed JSON record holds the ordered item list. Every mutation is a
//! read-modify-write of the whole record followed by one synchronous
//! local change signal. The key is versioned so a future schema change
//! introduces a new key instead of silently misreading old data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::warn;

use servicecart_core::{Cart, CartError, CartItem, Currency, ItemId, Money};

use crate::bus::{CartChanged, ChangeOrigin, Subscription, SyncBus};
use crate::error::StoreError;
use crate::watch::CartWatcher;

/// Versioned key for the persisted cart record.
pub const CART_STORE_KEY: &str = "cart_v1";

/// Cart store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the cart record.
    pub dir: PathBuf,
    /// The single configured currency.
    pub currency: Currency,
    /// Whether to watch the record for cross-process changes.
    pub watch: bool,
}

impl StoreConfig {
    /// Config with the default currency and the watcher enabled.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            currency: Currency::default(),
            watch: true,
        }
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Enable or disable the cross-process watcher.
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }
}

/// The persisted line-item store.
///
/// Constructed once per process and shared by every consumer; all cart
/// mutation goes through it.
pub struct CartStore {
    path: PathBuf,
    currency: Currency,
    bus: SyncBus,
    suppressed: Arc<AtomicU64>,
    _watcher: Option<CartWatcher>,
}

impl CartStore {
    /// Open (or create) the store under the configured directory.
    ///
    /// Watcher startup failure is a degradation, not an error: change
    /// signals then propagate in-process only.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.dir)?;
        let path = config.dir.join(format!("{CART_STORE_KEY}.json"));
        let bus = SyncBus::new();
        let suppressed = Arc::new(AtomicU64::new(0));

        let watcher = if config.watch {
            match CartWatcher::start(&path, bus.clone(), Arc::clone(&suppressed)) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    warn!("cross-process cart signal unavailable ({e}); changes propagate in-process only");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            path,
            currency: config.currency,
            bus,
            suppressed,
            _watcher: watcher,
        })
    }

    /// The configured currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Path of the persisted record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current cart.
    ///
    /// A missing, corrupt, or unreadable record reads as an empty cart;
    /// the cart is not critical data and reads never fail.
    pub fn read(&self) -> Cart {
        match fs::read_to_string(&self.path) {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!("corrupt cart record, treating as empty: {e}");
                    Cart::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Cart::new(),
            Err(e) => {
                warn!("unreadable cart record, treating as empty: {e}");
                Cart::new()
            }
        }
    }

    /// Add an item, merging quantities when its id already exists.
    pub fn add(&self, item: CartItem) -> Result<(), StoreError> {
        if item.price.currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.price.currency.code().to_string(),
            }
            .into());
        }
        let mut cart = self.read();
        cart.add(item);
        self.write(&cart)
    }

    /// Set an item's quantity, clamped to a minimum of 1.
    ///
    /// A missing id is a no-op: no write, no notification.
    pub fn set_qty(&self, id: &ItemId, qty: i64) -> Result<(), StoreError> {
        let mut cart = self.read();
        if !cart.set_qty(id, qty) {
            return Ok(());
        }
        self.write(&cart)
    }

    /// Remove an item. Writes and notifies unconditionally, so removing
    /// a missing id is an observable no-op rather than an error.
    pub fn remove(&self, id: &ItemId) -> Result<(), StoreError> {
        let mut cart = self.read();
        cart.remove(id);
        self.write(&cart)
    }

    /// Empty the cart.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.write(&Cart::new())
    }

    /// Total item count, derived from the current record.
    pub fn count(&self) -> i64 {
        self.read().count()
    }

    /// Subtotal in the configured currency, derived from the current
    /// record. Derivation failure is soft, like reads.
    pub fn subtotal(&self) -> Money {
        self.read().subtotal_in(self.currency).unwrap_or_else(|e| {
            warn!("cart subtotal derivation failed, treating as zero: {e}");
            Money::zero(self.currency)
        })
    }

    /// Subscribe to change signals. See [`SyncBus::subscribe`].
    pub fn subscribe(
        &self,
        handler: impl Fn(CartChanged) + Send + Sync + 'static,
    ) -> Subscription {
        self.bus.subscribe(handler)
    }

    /// The underlying bus.
    pub fn bus(&self) -> &SyncBus {
        &self.bus
    }

    /// Whole-record overwrite followed by one synchronous local signal.
    fn write(&self, cart: &Cart) -> Result<(), StoreError> {
        let body = serde_json::to_string(cart)?;
        self.suppressed.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = fs::write(&self.path, body) {
            // The watcher will see no event for this failed write.
            let _ = self
                .suppressed
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
            return Err(e.into());
        }
        self.bus.notify(ChangeOrigin::Local);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn open_plain(dir: &TempDir) -> CartStore {
        CartStore::open(StoreConfig::new(dir.path()).with_watch(false)).unwrap()
    }

    #[test]
    fn test_read_missing_record_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        assert!(store.read().is_empty());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_read_corrupt_record_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.read().is_empty());

        // A subsequent mutation rewrites the record cleanly.
        store
            .add(CartItem::new("p1", "Sticker Pack", usd(499)))
            .unwrap();
        assert_eq!(store.read().count(), 1);
    }

    #[test]
    fn test_add_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        let item = CartItem::new("p1", "Sticker Pack", usd(499)).with_sku("stk-001");
        store.add(item.clone()).unwrap();

        let cart = store.read();
        assert_eq!(cart.get(&ItemId::new("p1")), Some(&item));
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_plain(&dir);
            store
                .add(CartItem::new("p1", "Sticker Pack", usd(499)).with_qty(2))
                .unwrap();
        }
        let reopened = open_plain(&dir);
        assert_eq!(reopened.count(), 2);
    }

    #[test]
    fn test_add_rejects_currency_mismatch() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        let result = store.add(CartItem::new("p1", "Sticker Pack", Money::new(499, Currency::EUR)));
        assert!(matches!(
            result,
            Err(StoreError::Domain(CartError::CurrencyMismatch { .. }))
        ));
    }

    #[test]
    fn test_local_notification_is_synchronous() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let _sub = store.subscribe(move |change| {
            assert_eq!(change.origin, ChangeOrigin::Local);
            h.fetch_add(1, Ordering::SeqCst);
        });

        store
            .add(CartItem::new("p1", "Sticker Pack", usd(499)))
            .unwrap();
        // Delivered before add returned.
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_one_notification_per_mutation() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let _sub = store.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        store
            .add(CartItem::new("p1", "Sticker Pack", usd(499)))
            .unwrap();
        store.set_qty(&ItemId::new("p1"), 3).unwrap();
        store.remove(&ItemId::new("p1")).unwrap();
        store.clear().unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_set_qty_missing_id_does_not_notify() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let _sub = store.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        store.set_qty(&ItemId::new("ghost"), 5).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_missing_id_still_notifies() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let _sub = store.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        store.remove(&ItemId::new("ghost")).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_set_qty_clamps_below_one() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);
        store
            .add(CartItem::new("p1", "Sticker Pack", usd(499)))
            .unwrap();
        store.set_qty(&ItemId::new("p1"), -2).unwrap();
        assert_eq!(store.read().get(&ItemId::new("p1")).unwrap().qty, 1);
    }

    #[test]
    fn test_sticker_pack_scenario() {
        let dir = TempDir::new().unwrap();
        let store = open_plain(&dir);

        store
            .add(CartItem::new("p1", "Sticker Pack", Money::from_decimal(4.99, Currency::USD)))
            .unwrap();
        assert_eq!(store.subtotal().format_amount(), "4.99");
        assert_eq!(store.count(), 1);

        store.set_qty(&ItemId::new("p1"), 3).unwrap();
        assert_eq!(store.subtotal().format_amount(), "14.97");

        // Successful capture clears the cart.
        store.clear().unwrap();
        assert!(store.read().is_empty());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_two_stores_share_the_record() {
        let dir = TempDir::new().unwrap();
        let a = open_plain(&dir);
        let b = open_plain(&dir);

        a.add(CartItem::new("p1", "Sticker Pack", usd(499)).with_qty(2))
            .unwrap();
        // b re-reads on signal; here we just re-read directly.
        assert_eq!(b.count(), 2);
    }

    #[test]
    fn test_external_write_raises_signal() {
        let dir = TempDir::new().unwrap();
        let watching = CartStore::open(StoreConfig::new(dir.path())).unwrap();
        let external = Arc::new(AtomicUsize::new(0));
        let e = Arc::clone(&external);
        let _sub = watching.subscribe(move |change| {
            if change.origin == ChangeOrigin::External {
                e.fetch_add(1, Ordering::SeqCst);
            }
        });

        // Writes from a second store in the same directory look external
        // to the watching store.
        let other = open_plain(&dir);
        other
            .add(CartItem::new("p1", "Sticker Pack", usd(499)))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while external.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(external.load(Ordering::SeqCst) >= 1);
        assert_eq!(watching.count(), 1);
    }
}
