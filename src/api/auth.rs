//! Session Extractor
//!
//! Resolves `Authorization: Bearer <session id>` to the logged-in session.
//! Handlers that take [`CurrentSession`] answer 401 without one.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::session::Session;

/// The session making the request
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// Session id carried in the Authorization header, if well-formed
pub fn bearer_session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .and_then(|token| Uuid::parse_str(token.trim()).ok())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let id = bearer_session_id(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Please log in".to_string()))?;

        state
            .sessions
            .get(&id)
            .await
            .map(CurrentSession)
            .ok_or_else(|| ApiError::Unauthorized("Session expired, please log in again".to_string()))
    }
}
