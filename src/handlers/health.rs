use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// Liveness plus a store round-trip
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.services.health_check().await;

    if status.is_healthy() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": crate::VERSION,
                "database": status.database_backend,
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "database": status.database_backend,
                "issues": status.get_issues(),
            })),
        )
    }
}
