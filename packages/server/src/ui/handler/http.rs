//! HTTP endpoint handlers.

use std::{io, path::Path, sync::Arc};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{infrastructure::dto::http::SessionSnapshotDto, ui::state::AppState};

/// Serve the overlay page
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                index_unavailable(&state.static_dir, &e),
            )
                .into_response()
        }
    }
}

fn index_unavailable(static_dir: &Path, error: &io::Error) -> String {
    if error.kind() == io::ErrorKind::NotFound {
        format!(
            "index.html not found in '{}'. Put the overlay page there or pass --static-dir.",
            static_dir.display()
        )
    } else {
        format!(
            "Could not read index.html in '{}': {}",
            static_dir.display(),
            error
        )
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current state of the upstream session
pub async fn session_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshotDto>, StatusCode> {
    match state.session.snapshot().await {
        Ok(snapshot) => Ok(Json(snapshot.into())),
        Err(e) => {
            tracing::error!("Failed to read session snapshot: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
