//! HTTP endpoints.
//!
//! - `/`        : banner
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, "tsuru-team-metrics running")
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// One staleness check + one projection per scrape.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.exporter().emitter().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
