//! Projection of the current snapshot into the exported metric families.
//!
//! Degradation is silent: a stale or partial snapshot is rendered as is,
//! and there is no error family.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use teammetrics_core::error::Result;
use teammetrics_core::Snapshot;

use super::metrics::{FamilyRegistry, MetricFamily, MetricRecord};
use crate::inventory::{RefreshScheduler, SnapshotStore};

pub const APP_METADATA: MetricFamily = MetricFamily {
    name: "tsuru_app_metadata",
    help: "tsuru app metadata.",
    labels: &["app", "team_owner", "pool", "plan"],
};

pub const APP_ADDRESS: MetricFamily = MetricFamily {
    name: "tsuru_app_address",
    help: "tsuru app router addresses.",
    labels: &["app", "router", "address"],
};

pub const APP_CNAME: MetricFamily = MetricFamily {
    name: "tsuru_app_cname",
    help: "tsuru app cnames.",
    labels: &["app", "cname"],
};

pub const APP_UNITS_TOTAL: MetricFamily = MetricFamily {
    name: "tsuru_app_units_total",
    help: "tsuru app units per process.",
    labels: &["app", "process"],
};

pub const SERVICE_INSTANCE_METADATA: MetricFamily = MetricFamily {
    name: "tsuru_service_instance_metadata",
    help: "tsuru service instance metadata.",
    labels: &["service", "service_instance", "team_owner", "pool", "plan"],
};

pub const SERVICE_INSTANCE_BIND: MetricFamily = MetricFamily {
    name: "tsuru_service_instance_bind",
    help: "tsuru service instance binds to apps.",
    labels: &["service", "service_instance", "app"],
};

pub const FAMILIES: [MetricFamily; 6] = [
    APP_METADATA,
    APP_ADDRESS,
    APP_CNAME,
    APP_UNITS_TOTAL,
    SERVICE_INSTANCE_METADATA,
    SERVICE_INSTANCE_BIND,
];

/// Scrape-time view: check staleness, then project whatever is published.
pub struct MetricEmitter {
    scheduler: Arc<RefreshScheduler>,
    store: Arc<SnapshotStore>,
    registry: FamilyRegistry,
}

impl MetricEmitter {
    /// Registers the exported families. Fails on a bad or duplicate family.
    pub fn new(scheduler: Arc<RefreshScheduler>, store: Arc<SnapshotStore>) -> Result<Self> {
        let mut registry = FamilyRegistry::default();
        for family in FAMILIES {
            registry.register(family)?;
        }
        Ok(Self {
            scheduler,
            store,
            registry,
        })
    }

    pub fn registry(&self) -> &FamilyRegistry {
        &self.registry
    }

    pub fn emit(&self) -> Vec<MetricRecord> {
        self.scheduler.maybe_refresh();
        project(&self.store.snapshot())
    }

    /// `emit` rendered as Prometheus text.
    pub fn render(&self) -> String {
        self.registry.render(&self.emit())
    }
}

/// All families for one snapshot. Order within a family is not meaningful.
pub fn project(snapshot: &Snapshot) -> Vec<MetricRecord> {
    let mut out = Vec::new();
    let mut seen_addr: HashSet<(&str, &str, &str)> = HashSet::new();
    let mut seen_cname: HashSet<(&str, &str)> = HashSet::new();

    for app in snapshot.apps() {
        out.push(MetricRecord::new(
            &APP_METADATA,
            vec![app.name.clone(), app.team_owner.clone(), app.pool.clone(), app.plan.clone()],
            1,
        ));

        for r in &app.routers {
            if seen_addr.insert((app.name.as_str(), r.router.as_str(), r.address.as_str())) {
                out.push(MetricRecord::new(
                    &APP_ADDRESS,
                    vec![app.name.clone(), r.router.clone(), r.address.clone()],
                    1,
                ));
            }
        }

        for cname in &app.cnames {
            if seen_cname.insert((app.name.as_str(), cname.as_str())) {
                out.push(MetricRecord::new(&APP_CNAME, vec![app.name.clone(), cname.clone()], 1));
            }
        }

        let mut units: BTreeMap<&str, u64> = BTreeMap::new();
        for process in &app.units {
            *units.entry(process.as_str()).or_default() += 1;
        }
        for (process, count) in units {
            out.push(MetricRecord::new(
                &APP_UNITS_TOTAL,
                vec![app.name.clone(), process.to_string()],
                count,
            ));
        }
    }

    let mut seen_bind: HashSet<(&str, &str, &str)> = HashSet::new();
    for si in snapshot.service_instances() {
        out.push(MetricRecord::new(
            &SERVICE_INSTANCE_METADATA,
            vec![
                si.service.clone(),
                si.instance.clone(),
                si.info.team_owner.clone(),
                si.info.pool.clone(),
                si.info.plan.clone(),
            ],
            1,
        ));
        for app in &si.info.apps {
            if seen_bind.insert((si.service.as_str(), si.instance.as_str(), app.as_str())) {
                out.push(MetricRecord::new(
                    &SERVICE_INSTANCE_BIND,
                    vec![si.service.clone(), si.instance.clone(), app.clone()],
                    1,
                ));
            }
        }
    }
    out
}
