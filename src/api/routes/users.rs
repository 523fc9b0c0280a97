//! User Routes
//!
//! - GET /api/v1/users/profile?firebaseUid= - Backend user profile

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::auth::CurrentSession;
use crate::api::dto::{ProfileParams, ProfileResponse};
use crate::api::state::AppState;
use crate::views::fetch_or_default;

/// GET /api/v1/users/profile
pub async fn profile(
    State(state): State<Arc<AppState>>,
    _session: CurrentSession,
    Query(params): Query<ProfileParams>,
) -> Json<ProfileResponse> {
    let mut notices = Vec::new();
    let profile = fetch_or_default(
        "user profile",
        state.backend.user_profile(&params.firebase_uid),
        &mut notices,
    )
    .await;

    Json(ProfileResponse {
        profile: if profile.is_null() {
            serde_json::json!({})
        } else {
            profile
        },
        notices,
    })
}
