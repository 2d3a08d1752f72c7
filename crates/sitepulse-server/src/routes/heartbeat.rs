use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatPayload {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
}

/// `POST /api/heartbeat` — the client calls this periodically to report how
/// long the session has been on the page.
///
/// Duration is last-write-wins, not accumulated, and a zero/absent value
/// never overwrites a recorded one. Unknown session ids (evicted or never
/// created) are acknowledged with 200 and have no effect.
#[tracing::instrument(skip(state, payload))]
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<HeartbeatPayload>,
) -> Result<impl IntoResponse, AppError> {
    let Some(session_id) = payload.session_id.filter(|s| !s.is_empty()) else {
        return Err(AppError::BadRequest("sessionId is required".to_string()));
    };

    let mut log = state.store.load().await;
    if log.update_duration(&session_id, payload.duration.unwrap_or(0)) {
        state
            .store
            .save(&mut log)
            .await
            .map_err(anyhow::Error::from)?;
    }

    Ok((StatusCode::OK, Json(json!({ "ok": true }))))
}
