//! HTTP API Client
//!
//! Functions for communicating with the Mediculture portal server. Every
//! page call carries the session id as a bearer token.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api/v1";

const API_URL_KEY: &str = "mediculture_api_url";
const SESSION_KEY: &str = "mediculture_session";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

/// Session id saved by the last successful login
pub fn stored_session() -> Option<String> {
    local_storage().and_then(|storage| storage.get_item(SESSION_KEY).ok().flatten())
}

fn store_session(session_id: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(SESSION_KEY, session_id);
    }
}

/// Forget the saved session id
pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

// ============ Response Types ============

/// Error envelope returned by the portal server
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DoctorProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub license: String,
    pub experience: String,
    pub hospital: String,
    #[serde(default)]
    pub firebase_uid: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub session_id: String,
    pub doctor: DoctorProfile,
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CollectionCounts {
    #[serde(default)]
    pub users: Option<u64>,
    #[serde(default)]
    pub appointments: Option<u64>,
    #[serde(default)]
    pub medicines: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SystemStatus {
    pub connected: bool,
    pub label: String,
    pub database: String,
    #[serde(default)]
    pub collections: Option<CollectionCounts>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SidebarResponse {
    pub doctor: DoctorProfile,
    pub system: SystemStatus,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DashboardMetrics {
    pub scheduled_appointments: usize,
    pub completed_consultations: usize,
    pub available_medicines: u64,
    pub registered_users: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RecentAppointment {
    pub patient: String,
    pub date: String,
    pub status: String,
    pub indicator: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DashboardView {
    pub greeting: String,
    pub metrics: DashboardMetrics,
    #[serde(default)]
    pub status_distribution: Vec<CountEntry>,
    #[serde(default)]
    pub category_distribution: Vec<CountEntry>,
    #[serde(default)]
    pub recent_appointments: Vec<RecentAppointment>,
    #[serde(default)]
    pub backend_health: Option<serde_json::Value>,
    pub backend_connected: bool,
    #[serde(default)]
    pub notices: Vec<String>,
}

/// Status-changing action offered on an appointment card
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentAction {
    Complete,
    Reschedule,
    Cancel,
}

impl AppointmentAction {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentAction::Complete => "✅ Complete",
            AppointmentAction::Reschedule => "📅 Reschedule",
            AppointmentAction::Cancel => "❌ Cancel",
        }
    }

    /// Status sent in the PATCH body
    pub fn target_status(&self) -> &'static str {
        match self {
            AppointmentAction::Complete => "completed",
            AppointmentAction::Reschedule => "rescheduled",
            AppointmentAction::Cancel => "cancelled",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppointmentCard {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub patient_id: String,
    pub doctor: String,
    pub specialty: String,
    pub date: String,
    pub time: String,
    pub kind: String,
    pub status_label: String,
    pub fee: String,
    pub created: String,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub prescribed: Vec<String>,
    #[serde(default)]
    pub actions: Vec<AppointmentAction>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppointmentsView {
    pub filter_options: Vec<String>,
    pub selected_filter: String,
    pub heading: String,
    pub count: usize,
    pub appointments: Vec<AppointmentCard>,
    pub offer_demo: bool,
    #[serde(default)]
    pub empty_message: Option<String>,
    #[serde(default)]
    pub notices: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateResponse {
    pub id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub appointment: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PriceTag {
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    #[serde(default)]
    pub discount: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RatingLine {
    pub stars: String,
    pub label: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MedicineCard {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub manufacturer: String,
    pub dosage: String,
    pub packaging: String,
    pub price: PriceTag,
    pub in_stock: bool,
    pub stock_label: String,
    pub prescription_required: bool,
    pub prescription_label: String,
    #[serde(default)]
    pub rating: Option<RatingLine>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MedicinesView {
    pub categories: Vec<String>,
    pub heading: String,
    #[serde(default)]
    pub showing: Option<String>,
    pub count: usize,
    pub medicines: Vec<MedicineCard>,
    #[serde(default)]
    pub empty_message: Option<String>,
    #[serde(default)]
    pub notices: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MedicineLine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PrescriptionEntry {
    pub title: String,
    pub patient: String,
    pub doctor: String,
    pub date: String,
    pub kind: String,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub medicines: Vec<MedicineLine>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PrescriptionHistory {
    pub prescriptions: Vec<PrescriptionEntry>,
    #[serde(default)]
    pub empty_message: Option<String>,
    pub consultation_types: Vec<String>,
    pub max_medicines: usize,
    #[serde(default)]
    pub notices: Vec<String>,
}

// ============ Request Types ============

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct MedicineRow {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// Prescription form payload
#[derive(Clone, Debug, Serialize)]
pub struct PrescriptionForm {
    pub patient_id: String,
    pub doctor_name: Option<String>,
    pub specialty: Option<String>,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    pub consultation_type: String,
    /// One symptom per line
    pub symptoms: String,
    pub medicines: Vec<MedicineRow>,
    pub notes: String,
}

// ============ Request Helpers ============

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match stored_session() {
        Some(session) => builder.header("Authorization", &format!("Bearer {}", session)),
        None => builder,
    }
}

/// Turn a response into `T`, or into the server's error message
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        if response.status() == 401 {
            clear_session();
        }
        let message = response
            .json::<ApiError>()
            .await
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("Request failed with status {}", response.status()));
        return Err(message);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = authorized(Request::get(&format!("{}{}", get_api_base(), path)))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    builder: RequestBuilder,
    body: &B,
) -> Result<T, String> {
    let response = authorized(builder)
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

/// Build a query string from the parameters that are set
pub fn query_string(params: &[(&str, Option<&str>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value.map(|v| format!("{}={}", key, String::from(js_sys::encode_uri_component(v))))
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

// ============ API Functions ============

/// Log in as the demo doctor and remember the session
pub async fn login(email: &str, password: &str) -> Result<LoginResponse, String> {
    #[derive(Serialize)]
    struct LoginRequest<'a> {
        email: &'a str,
        password: &'a str,
    }

    let builder = Request::post(&format!("{}/session/login", get_api_base()));
    let response: LoginResponse = send_json(builder, &LoginRequest { email, password }).await?;
    store_session(&response.session_id);
    Ok(response)
}

/// End the session on the server and locally
pub async fn logout() -> Result<(), String> {
    let builder = Request::post(&format!("{}/session/logout", get_api_base()));
    let result: Result<serde_json::Value, String> = send_json(builder, &serde_json::json!({})).await;
    clear_session();
    result.map(|_| ())
}

/// Doctor for the saved session, if the server still knows it
pub async fn fetch_session() -> Result<DoctorProfile, String> {
    #[derive(Deserialize)]
    struct SessionResponse {
        doctor: DoctorProfile,
    }

    let session: SessionResponse = get_json("/session").await?;
    Ok(session.doctor)
}

pub async fn fetch_sidebar() -> Result<SidebarResponse, String> {
    get_json("/status").await
}

pub async fn fetch_dashboard() -> Result<DashboardView, String> {
    get_json("/dashboard").await
}

/// Fetch appointments; "All" sends no status
pub async fn fetch_appointments(filter: &str) -> Result<AppointmentsView, String> {
    let status = (filter != "All").then_some(filter);
    get_json(&format!("/appointments{}", query_string(&[("status", status)]))).await
}

pub async fn update_appointment_status(
    id: &str,
    action: AppointmentAction,
) -> Result<StatusUpdateResponse, String> {
    let url = format!(
        "{}/appointments/{}/status",
        get_api_base(),
        String::from(js_sys::encode_uri_component(id))
    );
    send_json(
        Request::patch(&url),
        &serde_json::json!({ "status": action.target_status() }),
    )
    .await
}

pub async fn create_demo_appointment() -> Result<CreatedResponse, String> {
    let builder = Request::post(&format!("{}/appointments/demo", get_api_base()));
    send_json(builder, &serde_json::json!({})).await
}

pub async fn fetch_medicines(
    search: &str,
    category: &str,
    searched: bool,
) -> Result<MedicinesView, String> {
    let search = (!search.is_empty()).then_some(search);
    let category = (category != "All").then_some(category);
    let searched = searched.then_some("true");

    get_json(&format!(
        "/medicines{}",
        query_string(&[("search", search), ("category", category), ("searched", searched)])
    ))
    .await
}

pub async fn fetch_prescriptions() -> Result<PrescriptionHistory, String> {
    get_json("/prescriptions").await
}

pub async fn create_prescription(form: &PrescriptionForm) -> Result<CreatedResponse, String> {
    let builder = Request::post(&format!("{}/prescriptions", get_api_base()));
    send_json(builder, form).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_targets() {
        assert_eq!(AppointmentAction::Complete.target_status(), "completed");
        assert_eq!(AppointmentAction::Reschedule.target_status(), "rescheduled");
        assert_eq!(AppointmentAction::Cancel.target_status(), "cancelled");
    }

    #[test]
    fn test_card_parses_server_payload() {
        let json = r#"{
            "id": "a1",
            "title": "Dr. Smith - 2024-05-01",
            "patient_id": "user123",
            "doctor": "Dr. Smith",
            "specialty": "Cardiology",
            "date": "2024-05-01",
            "time": "10:00 AM",
            "kind": "Consultation",
            "status": "scheduled",
            "status_label": "SCHEDULED",
            "fee": "$300",
            "created": "2024-04-30",
            "prescribed": [],
            "actions": ["complete", "reschedule", "cancel"]
        }"#;

        let card: AppointmentCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.actions.len(), 3);
        assert_eq!(card.actions[2], AppointmentAction::Cancel);
        assert!(card.symptoms.is_none());
    }
}
