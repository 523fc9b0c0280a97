//! Medicine Routes
//!
//! - GET /api/v1/medicines?search=&category=&searched= - Catalog search
//! - GET /api/v1/medicines/categories - Category list

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::auth::CurrentSession;
use crate::api::dto::CategoriesResponse;
use crate::api::state::AppState;
use crate::views::{fetch_or_default, MedicineSearch, MedicinesView};

/// GET /api/v1/medicines
pub async fn list_medicines(
    State(state): State<Arc<AppState>>,
    _session: CurrentSession,
    Query(search): Query<MedicineSearch>,
) -> Json<MedicinesView> {
    Json(MedicinesView::load(state.backend.as_ref(), &search).await)
}

/// GET /api/v1/medicines/categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    _session: CurrentSession,
) -> Json<CategoriesResponse> {
    let mut notices = Vec::new();
    let categories =
        fetch_or_default("categories", state.backend.medicine_categories(), &mut notices).await;

    Json(CategoriesResponse {
        categories,
        notices,
    })
}
