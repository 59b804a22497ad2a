//! Health endpoint
//!
//! Lives outside the session middleware so probes never allocate sessions.

use axum::{extract::State, response::Json};
use serde::Serialize;

use super::AppState;

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
    pub timestamp: String,
}

/// GET /health - liveness plus a session count
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.store.len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
