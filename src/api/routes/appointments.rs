//! Appointment Routes
//!
//! - GET /api/v1/appointments?status= - Filtered appointment list
//! - POST /api/v1/appointments/demo - Seed a demo appointment
//! - PATCH /api/v1/appointments/:id/status - Complete, reschedule or cancel

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::auth::CurrentSession;
use crate::api::dto::{
    AppointmentsParams, DemoAppointmentResponse, StatusUpdateRequest, StatusUpdateResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::backend::{AppointmentStatus, BackendError};
use crate::views::appointments::demo_appointment;
use crate::views::{AppointmentAction, AppointmentsView, StatusFilter};

/// GET /api/v1/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    _session: CurrentSession,
    Query(params): Query<AppointmentsParams>,
) -> ApiResult<Json<AppointmentsView>> {
    let filter = StatusFilter::parse(params.status.as_deref()).map_err(ApiError::Validation)?;

    Ok(Json(AppointmentsView::load(state.backend.as_ref(), filter).await))
}

/// POST /api/v1/appointments/demo
///
/// Create tomorrow's sample appointment for the logged-in doctor.
pub async fn create_demo_appointment(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<(StatusCode, Json<DemoAppointmentResponse>)> {
    let appointment = demo_appointment(&session.doctor, Utc::now());
    let created = state.backend.create_appointment(&appointment).await?;

    tracing::info!(doctor = %session.doctor.name, "Demo appointment created");

    Ok((
        StatusCode::CREATED,
        Json(DemoAppointmentResponse {
            message: "Demo appointment created!".to_string(),
            appointment: created,
        }),
    ))
}

/// PATCH /api/v1/appointments/:id/status
///
/// Only the transitions offered on an appointment card are accepted.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    _session: CurrentSession,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> ApiResult<Json<StatusUpdateResponse>> {
    let status: AppointmentStatus = req.status.parse().map_err(ApiError::Validation)?;

    let action = AppointmentAction::for_status(status).ok_or_else(|| {
        ApiError::Validation(format!(
            "Appointments can only be moved to completed, rescheduled or cancelled, not {}",
            status
        ))
    })?;

    state
        .backend
        .update_appointment_status(&id, status)
        .await
        .map_err(|e| match e {
            BackendError::Status { status: 404, .. } => {
                ApiError::NotFound(format!("Appointment {} not found", id))
            }
            other => ApiError::Backend(other),
        })?;

    tracing::info!(appointment_id = %id, status = %status, "Appointment status updated");

    Ok(Json(StatusUpdateResponse {
        id,
        status: status.to_string(),
        message: action.confirmation().to_string(),
    }))
}
