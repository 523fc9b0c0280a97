//! Backend record types
//!
//! Wire types for the clinic backend's REST API. The backend owns these
//! records; the portal only deserializes, displays and echoes them back.
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of strings where the list or any entry may be `null`.
/// Null entries are dropped and other scalars keep their JSON text.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
        .collect())
}

// ============================================
// Health
// ============================================

/// Status string the backend reports when it is healthy
pub const HEALTHY_STATUS: &str = "OK";

/// Response of `GET /health`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<CollectionCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Any other fields the backend includes, kept for display
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    /// Synthetic status used when the health endpoint cannot be reached
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Whether the backend reported itself healthy
    pub fn is_ok(&self) -> bool {
        self.status == HEALTHY_STATUS
    }

    /// Database name, or "Unknown"
    pub fn database_name(&self) -> &str {
        self.database.as_deref().unwrap_or("Unknown")
    }
}

/// Document counts per backend collection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicines: Option<u64>,
}

// ============================================
// Appointments
// ============================================

/// Lifecycle statuses the portal acts on. The backend may store others;
/// those stay as text on [`Appointment::status`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
    /// Missing or not one of the above
    #[default]
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    /// Statuses an operator can filter on
    pub fn all() -> &'static [AppointmentStatus] {
        &[
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Rescheduled,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Rescheduled => "rescheduled",
            AppointmentStatus::Unknown => "unknown",
        }
    }

    /// Appointments that have not happened yet can still be acted on
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }

    /// Statuses an open appointment may be moved to
    pub fn is_transition_target(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed
                | AppointmentStatus::Rescheduled
                | AppointmentStatus::Cancelled
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "rescheduled" => Ok(AppointmentStatus::Rescheduled),
            other => Err(format!("Unknown appointment status: {}", other)),
        }
    }
}

/// Consultation fees
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Fees {
    #[serde(default, deserialize_with = "null_as_default")]
    pub consultation: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: f64,
}

impl Fees {
    /// Flat fee charged for portal-created appointments
    pub fn standard() -> Self {
        Self {
            consultation: 300.0,
            total: 300.0,
        }
    }
}

/// One prescribed medicine line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrescribedMedicine {
    #[serde(default, deserialize_with = "null_as_default")]
    pub medicine_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dosage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frequency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
}

/// Prescription embedded in an appointment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    #[serde(default, deserialize_with = "null_as_default")]
    pub medicines: Vec<PrescribedMedicine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Appointment record as returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub symptoms: Vec<String>,
    /// Status text exactly as stored by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fees>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<Prescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Appointment {
    /// Status text for grouping and labels, "unknown" when missing
    pub fn status_name(&self) -> &str {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
    }

    /// Parsed lifecycle status; anything unrecognised is `Unknown`
    pub fn lifecycle(&self) -> AppointmentStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Prescribed medicines, empty when there is no prescription
    pub fn prescribed_medicines(&self) -> &[PrescribedMedicine] {
        self.prescription
            .as_ref()
            .map(|p| p.medicines.as_slice())
            .unwrap_or(&[])
    }

    /// Whether this appointment carries at least one prescribed medicine
    pub fn has_prescription(&self) -> bool {
        !self.prescribed_medicines().is_empty()
    }

    /// Total fee, 0 when absent
    pub fn total_fee(&self) -> f64 {
        self.fees.map(|f| f.total).unwrap_or(0.0)
    }
}

/// Response of `GET /appointments`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub appointments: Vec<Appointment>,
}

/// Body of `POST /appointments`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub user_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub appointment_date: String,
    pub time_slot: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub symptoms: Vec<String>,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub fees: Fees,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<Prescription>,
}

/// Query parameters for `GET /appointments`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub firebase_uid: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub limit: u32,
}

impl Default for AppointmentQuery {
    fn default() -> Self {
        Self {
            firebase_uid: None,
            status: None,
            limit: 50,
        }
    }
}

impl AppointmentQuery {
    pub fn with_status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Query string pairs; empty filters are not sent
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if let Some(uid) = self.firebase_uid.as_deref().filter(|s| !s.is_empty()) {
            params.push(("firebaseUid", uid.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

// ============================================
// Medicines
// ============================================

/// Customer rating summary
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    #[serde(default, deserialize_with = "null_as_default")]
    pub average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Medicine catalog record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prescription_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Pagination block of `GET /medicines`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
}

/// Response of `GET /medicines`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicineList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub medicines: Vec<Medicine>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

/// Query parameters for `GET /medicines`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl Default for MedicineQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
            category: None,
        }
    }
}

impl MedicineQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|s| !s.is_empty()) {
            params.push(("category", category.to_string()));
        }
        params
    }
}
