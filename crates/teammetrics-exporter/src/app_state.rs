//! Shared application state for the exporter.
//!
//! Startup errors (bad tsuru host, metric registration) surface as `Result`
//! so `main` can log and exit instead of panicking.

use std::sync::Arc;

use teammetrics_core::error::Result;

use crate::config::ExporterConfig;
use crate::exporter::Exporter;
use crate::upstream::{Directory, TsuruClient};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    exporter: Exporter,
}

impl AppState {
    /// Build state against the configured tsuru API.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let client = TsuruClient::new(&cfg.tsuru)?;
        Self::with_directory(cfg, Arc::new(client))
    }

    /// Build state against any directory implementation.
    pub fn with_directory(cfg: ExporterConfig, directory: Arc<dyn Directory>) -> Result<Self> {
        let exporter = Exporter::new(directory, &cfg.sync)?;
        tracing::info!(
            sync_interval_secs = cfg.sync.interval.as_secs(),
            max_requests = cfg.sync.max_requests,
            "exporter ready"
        );
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, exporter }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn exporter(&self) -> &Exporter {
        &self.inner.exporter
    }
}
