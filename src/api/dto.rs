//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not view
//! models. Page payloads live in [`crate::views`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::DoctorProfile;
use crate::views::SystemStatus;

// ============================================
// SESSION DTOs
// ============================================

/// Login form. Credentials are accepted as entered and never checked.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Send back as `Authorization: Bearer <session_id>`
    pub session_id: Uuid,
    pub doctor: DoctorProfile,
    pub message: String,
}

/// Logout acknowledgement
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: String,
}

/// Sidebar payload: who is logged in and whether the backend is up
#[derive(Debug, Serialize)]
pub struct SidebarResponse {
    pub doctor: DoctorProfile,
    pub system: SystemStatus,
}

// ============================================
// APPOINTMENT DTOs
// ============================================

/// Query string for the appointments page
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentsParams {
    /// "All" or one appointment status
    #[serde(default)]
    pub status: Option<String>,
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Status change acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub id: String,
    pub status: String,
    pub message: String,
}

/// Demo appointment creation result
#[derive(Debug, Serialize)]
pub struct DemoAppointmentResponse {
    pub message: String,
    pub appointment: serde_json::Value,
}

// ============================================
// CATALOG & USER DTOs
// ============================================

/// Medicine categories, empty when the backend could not be read
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub notices: Vec<String>,
}

/// Query string for the profile lookup
#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    #[serde(rename = "firebaseUid")]
    pub firebase_uid: String,
}

/// User profile, `{}` when the backend could not be read
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: serde_json::Value,
    pub notices: Vec<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the backend is reachable, else "degraded"
    pub status: String,
    pub backend: SystemStatus,
    pub active_sessions: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
