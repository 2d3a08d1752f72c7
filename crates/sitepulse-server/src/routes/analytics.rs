use std::sync::Arc;

use axum::{extract::State, Json};

use sitepulse_core::store::AnalyticsLog;

use crate::state::AppState;

/// `GET /api/analytics` — the full visit log as `{"visits": [...]}`.
#[tracing::instrument(skip(state))]
pub async fn analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsLog> {
    Json(state.store.load().await)
}
