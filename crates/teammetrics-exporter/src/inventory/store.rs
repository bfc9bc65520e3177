use std::sync::{Arc, PoisonError, RwLock};

use tokio::time::Instant;

use teammetrics_core::Snapshot;

/// Current snapshot + when it was published.
struct Published {
    snapshot: Arc<Snapshot>,
    refreshed_at: Option<Instant>,
}

/// Holds the last published inventory.
///
/// The lock only ever guards an `Arc` clone or swap; it is never held across
/// an `.await`.
pub struct SnapshotStore {
    inner: RwLock<Published>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Published {
                snapshot: Arc::new(Snapshot::empty()),
                refreshed_at: None,
            }),
        }
    }

    /// Current snapshot and its publish time (`None` until the first refresh).
    pub fn read(&self) -> (Arc<Snapshot>, Option<Instant>) {
        // Poisoned lock: the guarded value is a pointer swap, still consistent.
        let g = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        (Arc::clone(&g.snapshot), g.refreshed_at)
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.read().0
    }

    pub fn last_refresh(&self) -> Option<Instant> {
        self.read().1
    }

    /// Install `snapshot` as current, stamped now.
    pub fn replace(&self, snapshot: Snapshot) {
        self.replace_at(snapshot, Instant::now());
    }

    pub fn replace_at(&self, snapshot: Snapshot, at: Instant) {
        let snapshot = Arc::new(snapshot);
        let mut g = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        g.snapshot = snapshot;
        g.refreshed_at = Some(at);
    }
}
