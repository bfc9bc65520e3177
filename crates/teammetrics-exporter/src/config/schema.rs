use std::time::Duration;

use serde::Deserialize;
use teammetrics_core::error::{Result, TeamMetricsError};

use super::duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub tsuru: TsuruSection,

    #[serde(default)]
    pub sync: SyncSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            tsuru: TsuruSection::default(),
            sync: SyncSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(TeamMetricsError::Config("port must not be 0".into()));
        }
        self.tsuru.validate()?;
        self.sync.validate()?;
        Ok(())
    }

    /// Listen address for the metrics endpoint.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TsuruSection {
    /// Base URL of the tsuru API, e.g. `https://tsuru.example.com`.
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(
        default = "default_request_timeout",
        deserialize_with = "duration::deserialize"
    )]
    pub request_timeout: Duration,
}

impl Default for TsuruSection {
    fn default() -> Self {
        Self {
            host: String::new(),
            token: None,
            request_timeout: default_request_timeout(),
        }
    }
}

impl TsuruSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(TeamMetricsError::Config(
                "tsuru.host (TSURU_HOST) is required".into(),
            ));
        }
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(TeamMetricsError::Config(format!(
                "tsuru.host must be an http(s) url, got {:?}",
                self.host
            )));
        }
        if self.request_timeout < Duration::from_secs(1) {
            return Err(TeamMetricsError::Config(
                "tsuru.request_timeout must be at least 1s".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncSection {
    #[serde(
        default = "default_sync_interval",
        deserialize_with = "duration::deserialize"
    )]
    pub interval: Duration,

    /// Upper bound on concurrent service instance detail calls.
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            interval: default_sync_interval(),
            max_requests: default_max_requests(),
        }
    }
}

impl SyncSection {
    pub fn validate(&self) -> Result<()> {
        if self.interval < Duration::from_secs(1) {
            return Err(TeamMetricsError::Config(
                "sync.interval must be at least 1s".into(),
            ));
        }
        if !(1..=256).contains(&self.max_requests) {
            return Err(TeamMetricsError::Config(
                "sync.max_requests must be between 1 and 256".into(),
            ));
        }
        Ok(())
    }
}

fn default_port() -> u16 {
    19283
}
fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}
fn default_sync_interval() -> Duration {
    Duration::from_secs(15 * 60)
}
fn default_max_requests() -> usize {
    10
}
