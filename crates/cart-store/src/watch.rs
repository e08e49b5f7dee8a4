//! Cross-process change signal.
//!
//! Watches the persisted cart record and raises an `External` signal on
//! the bus when another process writes it. Writes made through this
//! process's own store are skipped via a suppression counter, mirroring
//! how a browser's `storage` event fires only in other tabs. A stray
//! extra signal is harmless: handlers re-read rather than trust it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::bus::{ChangeOrigin, SyncBus};

pub(crate) struct CartWatcher {
    // Watching stops when this is dropped. Lock-wrapped so the store
    // stays shareable across threads.
    _watcher: Mutex<RecommendedWatcher>,
}

impl CartWatcher {
    /// Start watching the cart record at `path`.
    pub(crate) fn start(
        path: &Path,
        bus: SyncBus,
        suppressed: Arc<AtomicU64>,
    ) -> Result<Self, notify::Error> {
        let dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path.file_name().map(|n| n.to_os_string());

        let mut watcher =
            notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("cart watcher error: {e}");
                        return;
                    }
                };
                if !(event.kind.is_modify() || event.kind.is_create()) {
                    return;
                }
                let ours = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if !ours {
                    return;
                }
                // Consume one suppression credit per self-write event.
                let self_write = suppressed
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok();
                if self_write {
                    return;
                }
                debug!("cart record changed externally");
                bus.notify(ChangeOrigin::External);
            })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(Self {
            _watcher: Mutex::new(watcher),
        })
    }
}
