//! Health check handler.

use std::time::Duration;

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// How long the database check may take before it counts as down.
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match tokio::time::timeout(DB_CHECK_TIMEOUT, state.db.health_check()).await {
        Ok(Ok(true)) => "up",
        _ => "down",
    };
    let storage = if state.upload_service.health_check().await {
        "up"
    } else {
        "down"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        storage: storage.to_string(),
    })
}
