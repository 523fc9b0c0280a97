//! Dashboard Route
//!
//! - GET /api/v1/dashboard - Metrics, charts and recent appointments

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::auth::CurrentSession;
use crate::api::state::AppState;
use crate::views::DashboardView;

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Json<DashboardView> {
    Json(DashboardView::load(state.backend.as_ref(), &session.doctor).await)
}
