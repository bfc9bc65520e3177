//! Upstream application/service directory (the tsuru API).
//!
//! The refresh engine only sees the `Directory` trait; `TsuruClient` is the
//! HTTP implementation used in production. Transport timeouts live in the
//! client, the engine imposes none of its own.

mod tsuru;

use async_trait::async_trait;

use teammetrics_core::error::Result;
use teammetrics_core::{AppRecord, ServiceInstanceInfo, ServiceListing};

pub use tsuru::TsuruClient;

#[async_trait]
pub trait Directory: Send + Sync {
    /// List all applications.
    async fn list_apps(&self) -> Result<Vec<AppRecord>>;

    /// List services with their instances (names only, or full records).
    async fn list_services(&self) -> Result<Vec<ServiceListing>>;

    /// Fetch the detail of one service instance.
    async fn service_instance(&self, service: &str, instance: &str)
        -> Result<ServiceInstanceInfo>;
}
