//! Instrumented in-memory directory shared by the engine tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use teammetrics_core::error::{Result, TeamMetricsError};
use teammetrics_core::{AppRecord, ServiceInstanceInfo, ServiceListing};
use teammetrics_exporter::upstream::Directory;

#[derive(Default)]
pub struct FakeDirectory {
    apps: Vec<AppRecord>,
    services: Vec<ServiceListing>,
    details: HashMap<(String, String), ServiceInstanceInfo>,
    failing_instances: HashSet<String>,
    detail_delay: Duration,
    detail_sequences: Mutex<HashMap<(String, String), VecDeque<(Duration, String)>>>,
    hold_apps: Option<Arc<Semaphore>>,

    pub fail_apps: AtomicBool,
    pub fail_services: AtomicBool,
    pub panic_on_apps: AtomicBool,

    list_apps_calls: AtomicUsize,
    list_services_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, app: AppRecord) -> Self {
        self.apps.push(app);
        self
    }

    pub fn with_service(mut self, listing: ServiceListing) -> Self {
        self.services.push(listing);
        self
    }

    /// Register a names-only service whose instances all resolve to `owner`.
    pub fn with_named_service(mut self, service: &str, instances: &[&str], owner: &str) -> Self {
        for i in instances {
            self.details.insert(
                (service.to_string(), i.to_string()),
                ServiceInstanceInfo {
                    team_owner: owner.into(),
                    pool: "prod".into(),
                    plan: "small".into(),
                    apps: vec![format!("{i}-app")],
                },
            );
        }
        self.services.push(ServiceListing::names(
            service,
            instances.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn with_detail(mut self, service: &str, instance: &str, info: ServiceInstanceInfo) -> Self {
        self.details
            .insert((service.to_string(), instance.to_string()), info);
        self
    }

    /// Successive detail calls for one instance answer in order, each after
    /// its own delay, with the given team owner.
    pub fn with_detail_sequence(
        self,
        service: &str,
        instance: &str,
        answers: Vec<(Duration, &str)>,
    ) -> Self {
        self.detail_sequences.lock().unwrap().insert(
            (service.to_string(), instance.to_string()),
            answers.into_iter().map(|(d, owner)| (d, owner.to_string())).collect(),
        );
        self
    }

    pub fn failing_instance(mut self, instance: &str) -> Self {
        self.failing_instances.insert(instance.to_string());
        self
    }

    pub fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = delay;
        self
    }

    /// `list_apps` blocks until the returned semaphore gets a permit.
    pub fn hold_apps(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.hold_apps = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn list_apps_calls(&self) -> usize {
        self.list_apps_calls.load(Ordering::SeqCst)
    }

    pub fn list_services_calls(&self) -> usize {
        self.list_services_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_apps_calls() + self.list_services_calls() + self.detail_calls()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn list_apps(&self) -> Result<Vec<AppRecord>> {
        self.list_apps_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.hold_apps {
            let _permit = gate.acquire().await;
        }
        if self.panic_on_apps.load(Ordering::SeqCst) {
            panic!("directory exploded");
        }
        if self.fail_apps.load(Ordering::SeqCst) {
            return Err(TeamMetricsError::upstream("list apps", "HTTP 500"));
        }
        Ok(self.apps.clone())
    }

    async fn list_services(&self) -> Result<Vec<ServiceListing>> {
        self.list_services_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_services.load(Ordering::SeqCst) {
            return Err(TeamMetricsError::upstream("list services", "HTTP 503"));
        }
        Ok(self.services.clone())
    }

    async fn service_instance(&self, service: &str, instance: &str) -> Result<ServiceInstanceInfo> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let scripted = self
            .detail_sequences
            .lock()
            .unwrap()
            .get_mut(&(service.to_string(), instance.to_string()))
            .and_then(VecDeque::pop_front);
        if let Some((delay, owner)) = scripted {
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            return Ok(ServiceInstanceInfo {
                team_owner: owner,
                ..Default::default()
            });
        }

        if !self.detail_delay.is_zero() {
            tokio::time::sleep(self.detail_delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.failing_instances.contains(instance) {
            return Err(TeamMetricsError::upstream("service instance", "HTTP 500"));
        }
        self.details
            .get(&(service.to_string(), instance.to_string()))
            .cloned()
            .ok_or_else(|| TeamMetricsError::upstream("service instance", "HTTP 404"))
    }
}

/// 3 apps; 2 services with 5 instances, all on the detail path.
pub fn inventory() -> FakeDirectory {
    FakeDirectory::new()
        .with_app(
            AppRecord::new("checkout", "payments", "prod", "c2m4")
                .with_router("ingress", "checkout.example.com")
                .with_unit("web")
                .with_unit("web")
                .with_unit("worker"),
        )
        .with_app(AppRecord::new("billing", "finance", "prod", "c1m2").with_cname("billing.example.org"))
        .with_app(AppRecord::new("docs", "platform", "dev", "c1m1"))
        .with_named_service("mysql", &["orders-db", "users-db", "ledger-db"], "payments")
        .with_named_service("redis", &["cache", "sessions"], "platform")
}
