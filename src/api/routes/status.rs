//! Sidebar Route
//!
//! - GET /api/v1/status - Doctor profile and backend status

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::auth::CurrentSession;
use crate::api::dto::SidebarResponse;
use crate::api::state::AppState;
use crate::views::SystemStatus;

/// GET /api/v1/status
pub async fn sidebar(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Json<SidebarResponse> {
    let system = SystemStatus::load(state.backend.as_ref()).await;

    Json(SidebarResponse {
        doctor: session.doctor,
        system,
    })
}
