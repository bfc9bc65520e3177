use std::collections::BTreeMap;
use std::time::SystemTime;

use super::{AppRecord, ServiceInstanceRecord};

/// Immutable inventory as of one refresh cycle.
///
/// Fields are private: once built, a snapshot is only ever read. Readers
/// share it behind an `Arc`; a refresh builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    apps: Vec<AppRecord>,
    service_instances: Vec<ServiceInstanceRecord>,
    fetched_at: Option<SystemTime>,
}

impl Snapshot {
    /// The startup snapshot: no data, never fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot. Apps are de-duplicated on name and service
    /// instances on (service, instance); in both cases the last one wins
    /// and the output is ordered by key.
    pub fn new(
        apps: Vec<AppRecord>,
        service_instances: impl IntoIterator<Item = ServiceInstanceRecord>,
        fetched_at: SystemTime,
    ) -> Self {
        let mut by_name: BTreeMap<String, AppRecord> = BTreeMap::new();
        for app in apps {
            by_name.insert(app.name.clone(), app);
        }
        let mut by_key: BTreeMap<(String, String), ServiceInstanceRecord> = BTreeMap::new();
        for si in service_instances {
            by_key.insert((si.service.clone(), si.instance.clone()), si);
        }
        Self {
            apps: by_name.into_values().collect(),
            service_instances: by_key.into_values().collect(),
            fetched_at: Some(fetched_at),
        }
    }

    pub fn apps(&self) -> &[AppRecord] {
        &self.apps
    }

    pub fn service_instances(&self) -> &[ServiceInstanceRecord] {
        &self.service_instances
    }

    /// Wall-clock time of the fetch; `None` for the startup snapshot.
    pub fn fetched_at(&self) -> Option<SystemTime> {
        self.fetched_at
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty() && self.service_instances.is_empty()
    }
}
