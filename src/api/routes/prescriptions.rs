//! Prescription Routes
//!
//! - GET /api/v1/prescriptions - Prescription history
//! - POST /api/v1/prescriptions - Create a prescription

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::auth::CurrentSession;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::views::{PrescriptionCreated, PrescriptionForm, PrescriptionHistory};

/// GET /api/v1/prescriptions
pub async fn history(
    State(state): State<Arc<AppState>>,
    _session: CurrentSession,
) -> Json<PrescriptionHistory> {
    Json(PrescriptionHistory::load(state.backend.as_ref()).await)
}

/// POST /api/v1/prescriptions
///
/// Store the form as a completed appointment carrying the prescription.
pub async fn create_prescription(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(form): Json<PrescriptionForm>,
) -> ApiResult<(StatusCode, Json<PrescriptionCreated>)> {
    let appointment = form.into_appointment(&session.doctor)?;
    let medicine_count = appointment
        .prescription
        .as_ref()
        .map(|p| p.medicines.len())
        .unwrap_or(0);

    let created = state.backend.create_appointment(&appointment).await?;

    tracing::info!(
        patient = %appointment.user_id,
        medicines = medicine_count,
        "Prescription created"
    );

    Ok((StatusCode::CREATED, Json(PrescriptionCreated::new(created))))
}
