use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::{BoundedFetcher, SnapshotStore};

/// Outcome of a staleness check.
#[derive(Debug)]
pub enum RefreshDecision {
    /// Snapshot younger than the sync interval; nothing to do.
    Fresh,
    /// Stale, but a cycle is already running.
    Busy,
    /// Stale; a cycle was spawned.
    Started(JoinHandle<()>),
}

impl RefreshDecision {
    pub fn started(&self) -> bool {
        matches!(self, RefreshDecision::Started(_))
    }
}

/// Starts at most one background refresh at a time, only when stale.
///
/// The gate is a single-permit semaphore taken with `try_acquire`, separate
/// from the store lock. The permit moves into the spawned task, so it is
/// released when the cycle ends, including on panic.
pub struct RefreshScheduler {
    fetcher: Arc<BoundedFetcher>,
    store: Arc<SnapshotStore>,
    gate: Arc<Semaphore>,
    sync_interval: Duration,
}

impl RefreshScheduler {
    pub fn new(fetcher: Arc<BoundedFetcher>, store: Arc<SnapshotStore>, sync_interval: Duration) -> Self {
        Self {
            fetcher,
            store,
            gate: Arc::new(Semaphore::new(1)),
            sync_interval,
        }
    }

    pub fn sync_interval(&self) -> Duration {
        self.sync_interval
    }

    /// Never refreshed, or older than the sync interval.
    pub fn is_stale(&self) -> bool {
        match self.store.last_refresh() {
            None => true,
            Some(at) => Instant::now().saturating_duration_since(at) > self.sync_interval,
        }
    }

    pub fn is_running(&self) -> bool {
        self.gate.available_permits() == 0
    }

    /// Called on every scrape. Never waits on the cycle it may start.
    pub fn maybe_refresh(&self) -> RefreshDecision {
        if !self.is_stale() {
            return RefreshDecision::Fresh;
        }

        let Ok(permit) = Arc::clone(&self.gate).try_acquire_owned() else {
            debug!("sync already in progress, serving current snapshot");
            return RefreshDecision::Busy;
        };

        // a cycle may have published between the check and the acquire
        if !self.is_stale() {
            return RefreshDecision::Fresh;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let handle = tokio::spawn(async move {
            let _permit = permit;
            let started = Instant::now();
            info!("starting tsuru data sync");
            match fetcher.run_cycle().await {
                Ok(report) => info!(
                    apps = report.apps,
                    service_instances = report.service_instances,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "finished tsuru data sync"
                ),
                Err(e) => warn!(
                    code = e.code().as_str(),
                    error = %e,
                    "tsuru data sync aborted, keeping previous snapshot"
                ),
            }
        });
        RefreshDecision::Started(handle)
    }
}
