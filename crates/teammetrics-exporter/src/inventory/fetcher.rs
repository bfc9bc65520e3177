//! One refresh cycle: list, fan out detail calls, join, publish.
//!
//! Listing failures abort the cycle and leave the store untouched. Detail
//! failures only drop the affected instance.

use std::sync::Arc;
use std::time::SystemTime;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use teammetrics_core::error::{Result, TeamMetricsError};
use teammetrics_core::{InstanceListing, ServiceInstanceRecord, Snapshot};

use super::SnapshotStore;
use crate::upstream::Directory;

/// Counts from one completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub apps: usize,
    pub service_instances: usize,
    /// Detail calls that failed (records dropped).
    pub detail_failures: usize,
    /// Records dropped for missing team owner.
    pub incomplete: usize,
}

pub struct BoundedFetcher {
    directory: Arc<dyn Directory>,
    store: Arc<SnapshotStore>,
    limit: Semaphore,
    max_requests: usize,
}

impl BoundedFetcher {
    pub fn new(directory: Arc<dyn Directory>, store: Arc<SnapshotStore>, max_requests: usize) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            directory,
            store,
            limit: Semaphore::new(max_requests),
            max_requests,
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Run one cycle and publish the result.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        // listing errors are logged by the scheduler
        debug!("listing apps");
        let apps = self.directory.list_apps().await?;

        debug!("listing service instances");
        let services = self.directory.list_services().await?;

        let mut records = Vec::new();
        let mut pending = Vec::new();
        for svc in services {
            match svc.instances {
                InstanceListing::Records(r) => records.extend(r),
                InstanceListing::Names(names) => {
                    pending.extend(names.into_iter().map(|i| (svc.service.clone(), i)))
                }
            }
        }

        let (fetched, detail_failures) = self.fetch_details(pending).await;
        records.extend(fetched);

        let before = records.len();
        records.retain(|si| {
            if !si.is_complete() {
                debug!(service = %si.service, instance = %si.instance, "dropping service instance without team owner");
            }
            si.is_complete()
        });
        let incomplete = before - records.len();

        let snapshot = Snapshot::new(apps, records, SystemTime::now());
        let report = CycleReport {
            apps: snapshot.apps().len(),
            service_instances: snapshot.service_instances().len(),
            detail_failures,
            incomplete,
        };
        self.store.replace(snapshot);

        info!(
            apps = report.apps,
            service_instances = report.service_instances,
            detail_failures = report.detail_failures,
            incomplete = report.incomplete,
            "snapshot published"
        );
        Ok(report)
    }

    /// Fetch details for every (service, instance), at most `max_requests`
    /// in flight. Returns the successful records in submission order and
    /// the failure count.
    async fn fetch_details(
        &self,
        pending: Vec<(String, String)>,
    ) -> (Vec<ServiceInstanceRecord>, usize) {
        let directory = &self.directory;
        let limit = &self.limit;

        let mut futs = FuturesUnordered::new();
        for (idx, (service, instance)) in pending.into_iter().enumerate() {
            futs.push(async move {
                let res = match limit.acquire().await {
                    Ok(_permit) => {
                        debug!(%service, %instance, "getting service instance");
                        directory.service_instance(&service, &instance).await
                    }
                    Err(_) => Err(TeamMetricsError::Internal("request limiter closed".into())),
                };
                (idx, service, instance, res)
            });
        }

        let mut out = Vec::with_capacity(futs.len());
        let mut failures = 0;
        while let Some((idx, service, instance, res)) = futs.next().await {
            match res {
                Ok(info) => out.push((idx, ServiceInstanceRecord::new(service, instance, info))),
                Err(e) => {
                    failures += 1;
                    warn!(%service, %instance, error = %e, "unable to fetch service instance info");
                }
            }
        }
        out.sort_unstable_by_key(|(idx, _)| *idx);
        (out.into_iter().map(|(_, record)| record).collect(), failures)
    }
}
