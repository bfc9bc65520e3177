//! Exporter config loader (strict parsing).
//!
//! Precedence, lowest first: defaults, the YAML file named by `CONFIG_FILE`,
//! then the environment (`PORT`, `TSURU_HOST`, `TSURU_TOKEN`,
//! `SYNC_INTERVAL`, `MAX_REQUESTS`, `REQUEST_TIMEOUT`).

pub mod duration;
pub mod schema;

use std::collections::HashMap;
use std::fs;

use teammetrics_core::error::{Result, TeamMetricsError};

pub use schema::{ExporterConfig, SyncSection, TsuruSection};

/// Resolve config from the process environment.
pub fn load_from_env() -> Result<ExporterConfig> {
    load_from_vars(std::env::vars())
}

/// Resolve config from explicit key/value pairs (same rules as the environment).
pub fn load_from_vars<I, K, V>(vars: I) -> Result<ExporterConfig>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(_, v)| !v.is_empty())
        .collect();

    let mut cfg = match vars.get("CONFIG_FILE") {
        Some(path) => parse_yaml(&read_file(path)?)?,
        None => ExporterConfig::default(),
    };
    apply_env(&mut cfg, &vars)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    load_from_str(&read_file(path)?)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg = parse_yaml(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| TeamMetricsError::Config(format!("read config {path} failed: {e}")))
}

fn parse_yaml(s: &str) -> Result<ExporterConfig> {
    serde_yaml::from_str(s).map_err(|e| TeamMetricsError::Config(format!("invalid yaml: {e}")))
}

fn apply_env(cfg: &mut ExporterConfig, vars: &HashMap<String, String>) -> Result<()> {
    if let Some(v) = vars.get("PORT") {
        cfg.port = v
            .trim()
            .parse()
            .map_err(|_| TeamMetricsError::Config(format!("PORT: invalid port {v:?}")))?;
    }
    // TSURU_TARGET is what the tsuru CLI exports
    if let Some(v) = vars.get("TSURU_HOST").or_else(|| vars.get("TSURU_TARGET")) {
        cfg.tsuru.host = v.trim().to_string();
    }
    if let Some(v) = vars.get("TSURU_TOKEN") {
        cfg.tsuru.token = Some(v.trim().to_string());
    }
    if let Some(v) = vars.get("REQUEST_TIMEOUT") {
        cfg.tsuru.request_timeout = duration::parse(v).ok_or_else(|| {
            TeamMetricsError::Config(format!("REQUEST_TIMEOUT: invalid duration {v:?}"))
        })?;
    }
    if let Some(v) = vars.get("SYNC_INTERVAL") {
        cfg.sync.interval = duration::parse(v).ok_or_else(|| {
            TeamMetricsError::Config(format!("SYNC_INTERVAL: invalid duration {v:?}"))
        })?;
    }
    if let Some(v) = vars.get("MAX_REQUESTS") {
        cfg.sync.max_requests = v
            .trim()
            .parse()
            .map_err(|_| TeamMetricsError::Config(format!("MAX_REQUESTS: invalid integer {v:?}")))?;
    }
    Ok(())
}
