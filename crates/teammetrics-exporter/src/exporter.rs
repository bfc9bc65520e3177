//! Explicit object graph: store -> fetcher -> scheduler -> emitter.
//!
//! Built once at startup and handed to the HTTP layer; nothing registers
//! itself globally.

use std::sync::Arc;
use std::time::Duration;

use teammetrics_core::error::Result;

use crate::config::SyncSection;
use crate::inventory::{BoundedFetcher, RefreshScheduler, SnapshotStore};
use crate::obs::MetricEmitter;
use crate::upstream::Directory;

pub struct Exporter {
    store: Arc<SnapshotStore>,
    scheduler: Arc<RefreshScheduler>,
    emitter: MetricEmitter,
}

impl Exporter {
    pub fn new(directory: Arc<dyn Directory>, sync: &SyncSection) -> Result<Self> {
        Self::with_limits(directory, sync.interval, sync.max_requests)
    }

    pub fn with_limits(
        directory: Arc<dyn Directory>,
        sync_interval: Duration,
        max_requests: usize,
    ) -> Result<Self> {
        let store = Arc::new(SnapshotStore::new());
        let fetcher = Arc::new(BoundedFetcher::new(directory, Arc::clone(&store), max_requests));
        let scheduler = Arc::new(RefreshScheduler::new(fetcher, Arc::clone(&store), sync_interval));
        let emitter = MetricEmitter::new(Arc::clone(&scheduler), Arc::clone(&store))?;
        Ok(Self {
            store,
            scheduler,
            emitter,
        })
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn emitter(&self) -> &MetricEmitter {
        &self.emitter
    }
}
