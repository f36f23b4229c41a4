//! Route handlers.
//!
//! Grouped by resource, mirroring the URL layout:
//! `/api/v1/auth/*`, `/api/v1/sweets/*`, `/api/v1/inventory/*`.

pub mod auth;
pub mod inventory;
pub mod sweets;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::AppState;

/// Liveness probe including a database round trip.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    if state.db.health_check().await {
        (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "status": "unhealthy" })),
        )
    }
}
