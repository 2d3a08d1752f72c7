use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use sitepulse_core::config::Config;
use sitepulse_core::store::MemoryStore;
use sitepulse_server::app::build_app;
use sitepulse_server::geo::{Geolocate, Location};
use sitepulse_server::state::AppState;

fn test_config() -> Config {
    Config {
        port: 0,
        site_dir: "/nonexistent/site".to_string(),
        data_file: "/tmp/sitepulse-test.json".to_string(),
        geoip_path: "/nonexistent/GeoLite2-City.mmdb".to_string(),
        excluded_ips: vec![],
        cors_origins: vec![],
    }
}

struct NoGeo;

impl Geolocate for NoGeo {
    fn locate(&self, _ip: &str) -> Option<Location> {
        None
    }
}

fn setup() -> axum::Router {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(store, Arc::new(NoGeo), test_config()));
    build_app(state)
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON")
}

// ============================================================
// BDD: The analytics endpoint always returns the log shape
// ============================================================
#[tokio::test]
async fn test_analytics_returns_empty_log_shape() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/analytics")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["visits"], serde_json::json!([]));
}

// ============================================================
// BDD: Health check reports ok on a readable store
// ============================================================
#[tokio::test]
async fn test_health_returns_200_when_store_readable() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// ============================================================
// BDD: The dashboard route 404s when the page is absent
// ============================================================
#[tokio::test]
async fn test_dashboard_missing_page_is_404() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/analytics")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
