//! Body decoders for the tsuru API responses.
//!
//! An empty body (HTTP 204 from a listing endpoint) decodes to an empty list.

use serde::de::DeserializeOwned;

use crate::error::{Result, TeamMetricsError};

use super::{AppRecord, ServiceInstanceInfo, ServiceListing};

/// Decode `GET /1.0/apps`.
pub fn decode_apps(body: &[u8]) -> Result<Vec<AppRecord>> {
    decode_list("list apps", body)
}

/// Decode `GET /1.0/services/instances`.
pub fn decode_service_listings(body: &[u8]) -> Result<Vec<ServiceListing>> {
    decode_list("list services", body)
}

/// Decode `GET /1.0/services/{service}/instances/{instance}`.
pub fn decode_instance_info(body: &[u8]) -> Result<ServiceInstanceInfo> {
    serde_json::from_slice(body)
        .map_err(|e| TeamMetricsError::upstream("service instance", format!("invalid json: {e}")))
}

fn decode_list<T: DeserializeOwned>(op: &'static str, body: &[u8]) -> Result<Vec<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let items: Option<Vec<T>> = serde_json::from_slice(body)
        .map_err(|e| TeamMetricsError::upstream(op, format!("invalid json: {e}")))?;
    Ok(items.unwrap_or_default())
}
