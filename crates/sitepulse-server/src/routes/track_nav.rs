use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackNavPayload {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `POST /api/track-nav` — increments the session's navigation counter.
///
/// Unknown session ids are acknowledged with 200 and have no effect.
#[tracing::instrument(skip(state, payload))]
pub async fn track_nav(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrackNavPayload>,
) -> Result<impl IntoResponse, AppError> {
    let Some(session_id) = payload.session_id.filter(|s| !s.is_empty()) else {
        return Err(AppError::BadRequest("sessionId is required".to_string()));
    };

    let mut log = state.store.load().await;
    if log.increment_nav(&session_id) {
        state
            .store
            .save(&mut log)
            .await
            .map_err(anyhow::Error::from)?;
    }

    Ok((StatusCode::OK, Json(json!({ "ok": true }))))
}
