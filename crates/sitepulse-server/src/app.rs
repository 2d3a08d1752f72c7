use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{recorder, routes, state::AppState, static_site};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `CorsLayer` — the heartbeat/track-nav endpoints may be called from a
///    page served elsewhere during development.
/// 2. `TraceLayer` — structured request/response logging via `tracing`.
/// 3. Visit recorder — classifies and records qualifying page views, and
///    tags responses with `X-Session-Id`.
/// 4. Cache headers — per-path `Cache-Control` for the static site.
///
/// Everything not matched by an explicit route is served from the site
/// directory, with unmatched paths falling back to the index document.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/heartbeat", post(routes::heartbeat::heartbeat))
        .route("/api/track-nav", post(routes::track_nav::track_nav))
        .route("/api/analytics", get(routes::analytics::analytics))
        .route("/analytics", get(routes::dashboard::dashboard))
        .fallback_service(static_site::service(&state.config.site_dir))
        .layer(middleware::from_fn(static_site::cache_headers))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            recorder::record_visit,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
