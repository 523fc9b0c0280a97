//! Health Routes
//!
//! - GET /health/live - The portal process is up
//! - GET /health/ready - The clinic backend answers with `status: "OK"`
//! - GET /health - Portal and backend status together

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::views::SystemStatus;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// 503 while the backend is down. The body carries the backend status.
pub async fn readiness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<SystemStatus>) {
    let backend = SystemStatus::load(state.backend.as_ref()).await;

    let code = if backend.connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(backend))
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend = SystemStatus::load(state.backend.as_ref()).await;

    Json(HealthResponse {
        status: if backend.connected { "healthy" } else { "degraded" }.to_string(),
        backend,
        active_sessions: state.sessions.count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_has_no_dependencies() {
        assert_eq!(liveness().await, StatusCode::OK);
    }
}
