use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{error::AppError, state::AppState};

/// `GET /analytics` — the dashboard page, served from the site directory.
#[tracing::instrument(skip(state))]
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let path = Path::new(&state.config.site_dir).join("analytics-dashboard.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(_) => Err(AppError::NotFound("dashboard not found".to_string())),
    }
}
