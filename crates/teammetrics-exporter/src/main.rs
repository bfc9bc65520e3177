//! teammetrics exporter
//!
//! Republishes tsuru app and service instance inventory as Prometheus
//! metrics on `0.0.0.0:$PORT/metrics`. Inventory is refreshed in the
//! background when a scrape finds it older than `SYNC_INTERVAL`.

use tracing_subscriber::{fmt, EnvFilter};

use teammetrics_core::error::{Result, TeamMetricsError};
use teammetrics_exporter::{app_state, config, router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "unable to start server");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let listen = cfg.listen_addr();

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "teammetrics-exporter listening");
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| TeamMetricsError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| TeamMetricsError::Internal(format!("server failed: {e}")))
}
