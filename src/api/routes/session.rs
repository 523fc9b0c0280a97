//! Session Routes
//!
//! Mock login for the portal.
//!
//! - POST /api/v1/session/login - Start a session for the demo doctor
//! - POST /api/v1/session/logout - End the current session
//! - GET /api/v1/session - Current session

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::auth::CurrentSession;
use crate::api::dto::{LoginRequest, LoginResponse, LogoutResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::session::Session;
use crate::views::fetch_health;

/// POST /api/v1/session/login
///
/// Refuses to log in while the backend is unreachable.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let health = fetch_health(state.backend.as_ref()).await;
    if !health.is_ok() {
        return Err(ApiError::ServiceUnavailable(
            "Cannot connect to backend server".to_string(),
        ));
    }

    tracing::debug!(
        password_supplied = req.password.is_some(),
        "Demo login, credentials not checked"
    );

    let session = state.sessions.login(req.email.as_deref()).await;

    Ok(Json(LoginResponse {
        session_id: session.id,
        doctor: session.doctor,
        message: "Login successful! Redirecting to dashboard...".to_string(),
    }))
}

/// POST /api/v1/session/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Json<LogoutResponse> {
    state.sessions.logout(&session.id).await;

    Json(LogoutResponse {
        status: "logged_out".to_string(),
    })
}

/// GET /api/v1/session
pub async fn current(CurrentSession(session): CurrentSession) -> Json<Session> {
    Json(session)
}
