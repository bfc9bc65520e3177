#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::SystemTime;

use teammetrics_core::{AppRecord, ServiceInstanceInfo, ServiceInstanceRecord, Snapshot};

fn instance(service: &str, name: &str, owner: &str) -> ServiceInstanceRecord {
    ServiceInstanceRecord::new(
        service,
        name,
        ServiceInstanceInfo {
            team_owner: owner.into(),
            ..Default::default()
        },
    )
}

#[test]
fn startup_snapshot_is_empty() {
    let snap = Snapshot::empty();
    assert!(snap.is_empty());
    assert!(snap.fetched_at().is_none());
}

#[test]
fn instances_are_keyed_and_ordered() {
    let snap = Snapshot::new(
        vec![AppRecord::new("a", "t", "p", "plan")],
        vec![
            instance("redis", "cache", "old"),
            instance("mysql", "db", "t1"),
            instance("redis", "cache", "new"),
        ],
        SystemTime::now(),
    );

    let keys: Vec<_> = snap.service_instances().iter().map(|s| s.key()).collect();
    assert_eq!(keys, vec![("mysql", "db"), ("redis", "cache")]);
    // last one wins
    assert_eq!(snap.service_instances()[1].info.team_owner, "new");
    assert_eq!(snap.apps().len(), 1);
    assert!(snap.fetched_at().is_some());
}

#[test]
fn incomplete_without_team_owner() {
    assert!(!instance("mysql", "db", "").is_complete());
    assert!(instance("mysql", "db", "team").is_complete());
}

#[test]
fn apps_are_keyed_by_name() {
    let snap = Snapshot::new(
        vec![
            AppRecord::new("web", "old", "p", "plan").with_unit("web"),
            AppRecord::new("api", "t", "p", "plan"),
            AppRecord::new("web", "new", "p", "plan").with_unit("web"),
        ],
        Vec::new(),
        SystemTime::now(),
    );

    let names: Vec<_> = snap.apps().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["api", "web"]);
    assert_eq!(snap.apps()[1].team_owner, "new");
    assert_eq!(snap.apps()[1].units, vec!["web"]);
}
