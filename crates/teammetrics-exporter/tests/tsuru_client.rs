#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use serde_json::json;

use teammetrics_exporter::config::TsuruSection;
use teammetrics_exporter::upstream::{Directory, TsuruClient};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(host: &str, token: Option<&str>) -> TsuruClient {
    TsuruClient::new(&TsuruSection {
        host: host.to_string(),
        token: token.map(str::to_string),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap()
}

async fn apps(headers: HeaderMap) -> Response {
    let authed = headers
        .get(header::AUTHORIZATION)
        .map(|v| v == "bearer tok")
        .unwrap_or(false);
    if !authed {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    axum::Json(json!([
        {
            "name": "checkout",
            "teamowner": "payments",
            "pool": "prod",
            "plan": { "name": "c2m4" },
            "units": [{ "ProcessName": "web" }]
        }
    ]))
    .into_response()
}

async fn instance(Path((service, instance)): Path<(String, String)>) -> Response {
    axum::Json(json!({
        "teamowner": format!("{service}/{instance}"),
        "pool": "prod",
        "planname": "small",
        "apps": ["checkout"]
    }))
    .into_response()
}

fn tsuru_api() -> Router {
    Router::new()
        .route("/1.0/apps", get(apps))
        .route("/1.0/services/instances", get(|| async { StatusCode::NO_CONTENT }))
        .route("/1.0/services/:service/instances/:instance", get(instance))
}

#[tokio::test]
async fn list_apps_sends_bearer_token() {
    let host = serve(tsuru_api()).await;

    let apps = client(&host, Some("tok")).list_apps().await.unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].name, "checkout");
    assert_eq!(apps[0].units, vec!["web"]);

    let err = client(&host, None).list_apps().await.expect_err("must fail");
    assert_eq!(err.code().as_str(), "UPSTREAM");
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn no_content_listing_is_empty() {
    let host = serve(tsuru_api()).await;
    let services = client(&host, Some("tok")).list_services().await.unwrap();
    assert!(services.is_empty());
}

#[tokio::test]
async fn instance_path_segments_are_encoded() {
    let host = serve(tsuru_api()).await;
    let info = client(&format!("{host}/"), Some("tok"))
        .service_instance("my sql", "orders/db")
        .await
        .unwrap();
    assert_eq!(info.team_owner, "my sql/orders/db");
    assert_eq!(info.plan, "small");
}

#[tokio::test]
async fn server_error_is_upstream_error() {
    let router = Router::new().route(
        "/1.0/services/instances",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let host = serve(router).await;

    let err = client(&host, Some("tok")).list_services().await.expect_err("must fail");
    assert_eq!(err.code().as_str(), "UPSTREAM");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn unreachable_host_is_upstream_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let host = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&host, None).list_apps().await.expect_err("must fail");
    assert_eq!(err.code().as_str(), "UPSTREAM");
}
