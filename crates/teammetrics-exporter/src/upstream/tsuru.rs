use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};

use teammetrics_core::error::{Result, TeamMetricsError};
use teammetrics_core::model::wire;
use teammetrics_core::{AppRecord, ServiceInstanceInfo, ServiceListing};

use super::Directory;
use crate::config::TsuruSection;

/// tsuru API client (`/1.0` endpoints, bearer token auth).
#[derive(Debug, Clone)]
pub struct TsuruClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl TsuruClient {
    pub fn new(cfg: &TsuruSection) -> Result<Self> {
        let base = Url::parse(cfg.host.trim())
            .map_err(|e| TeamMetricsError::Config(format!("invalid tsuru host {:?}: {e}", cfg.host)))?;
        if base.cannot_be_a_base() {
            return Err(TeamMetricsError::Config(format!(
                "tsuru host {:?} cannot be used as a base url",
                cfg.host
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| TeamMetricsError::Internal(format!("http client build failed: {e}")))?;

        Ok(Self {
            http,
            base,
            token: cfg.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TeamMetricsError::Internal("tsuru base url has no path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(
        &self,
        op: &'static str,
        segments: &[&str],
        decode: fn(&[u8]) -> Result<T>,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let mut req = self.http.get(url.clone()).header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("bearer {token}"));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TeamMetricsError::upstream(op, format!("GET {}: {e}", url.path())))?;

        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return decode(&[]);
        }
        if !status.is_success() {
            return Err(TeamMetricsError::upstream(
                op,
                format!("GET {}: HTTP {status}", url.path()),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| TeamMetricsError::upstream(op, format!("GET {}: {e}", url.path())))?;
        decode(&body)
    }
}

#[async_trait]
impl Directory for TsuruClient {
    async fn list_apps(&self) -> Result<Vec<AppRecord>> {
        self.get("list apps", &["1.0", "apps"], wire::decode_apps).await
    }

    async fn list_services(&self) -> Result<Vec<ServiceListing>> {
        self.get(
            "list services",
            &["1.0", "services", "instances"],
            wire::decode_service_listings,
        )
        .await
    }

    async fn service_instance(&self, service: &str, instance: &str) -> Result<ServiceInstanceInfo> {
        self.get(
            "service instance",
            &["1.0", "services", service, "instances", instance],
            wire::decode_instance_info,
        )
        .await
    }
}
