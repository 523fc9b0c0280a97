//! Clinic Backend REST Client
//!
//! HTTP client for the clinic backend's REST API. One method per endpoint,
//! each a single request with a fixed timeout. Failures are returned as
//! [`BackendError`]; deciding what to show instead is left to the caller.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use super::types::{
    AppointmentList, AppointmentQuery, AppointmentStatus, HealthStatus, MedicineList,
    MedicineQuery, NewAppointment,
};

/// Operations the portal needs from the clinic backend
#[async_trait]
pub trait ClinicBackend: Send + Sync {
    /// Check backend health
    async fn health(&self) -> Result<HealthStatus, BackendError>;

    /// List appointments, optionally filtered by patient and status
    async fn list_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<AppointmentList, BackendError>;

    /// Move an appointment to a new status
    async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<(), BackendError>;

    /// Create an appointment, returning the backend's echo of it
    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<serde_json::Value, BackendError>;

    /// List catalog medicines
    async fn list_medicines(&self, query: &MedicineQuery) -> Result<MedicineList, BackendError>;

    /// List medicine categories
    async fn medicine_categories(&self) -> Result<Vec<String>, BackendError>;

    /// Fetch a user profile by Firebase UID
    async fn user_profile(&self, firebase_uid: &str) -> Result<serde_json::Value, BackendError>;
}

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL including the API prefix (e.g., "http://localhost:3000/api")
    pub base_url: String,
    /// Timeout for health checks in milliseconds
    pub health_timeout_ms: u64,
    /// Timeout for every other request in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            health_timeout_ms: 5_000,
            request_timeout_ms: 10_000,
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// reqwest-backed [`ClinicBackend`]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a new client with the given configuration
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder().build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            config: BackendConfig { base_url, ..config },
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.request_timeout_ms)
    }

    /// Send a request and fail on any non-2xx status
    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(BackendError::from_transport)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(BackendError::Status {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self.send(request).await?;
        response.json().await.map_err(BackendError::Decode)
    }
}

#[async_trait]
impl ClinicBackend for BackendClient {
    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let request = self
            .client
            .get(self.url("/health"))
            .timeout(Duration::from_millis(self.config.health_timeout_ms));

        self.send_json(request).await
    }

    async fn list_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<AppointmentList, BackendError> {
        let request = self
            .client
            .get(self.url("/appointments"))
            .query(&query.params())
            .timeout(self.request_timeout());

        self.send_json(request).await
    }

    async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<(), BackendError> {
        let request = self
            .client
            .patch(self.url(&format!(
                "/appointments/{}/status",
                urlencoding::encode(appointment_id)
            )))
            .json(&serde_json::json!({ "status": status }))
            .timeout(self.request_timeout());

        self.send(request).await?;
        tracing::info!(appointment_id, status = %status, "Appointment status updated");
        Ok(())
    }

    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<serde_json::Value, BackendError> {
        let request = self
            .client
            .post(self.url("/appointments"))
            .json(appointment)
            .timeout(self.request_timeout());

        let created: serde_json::Value = self.send_json(request).await?;
        tracing::info!(
            patient = %appointment.user_id,
            status = %appointment.status,
            "Appointment created"
        );
        Ok(created)
    }

    async fn list_medicines(&self, query: &MedicineQuery) -> Result<MedicineList, BackendError> {
        let request = self
            .client
            .get(self.url("/medicines"))
            .query(&query.params())
            .timeout(self.request_timeout());

        self.send_json(request).await
    }

    async fn medicine_categories(&self) -> Result<Vec<String>, BackendError> {
        let request = self
            .client
            .get(self.url("/medicines/categories/list"))
            .timeout(self.request_timeout());

        self.send_json(request).await
    }

    async fn user_profile(&self, firebase_uid: &str) -> Result<serde_json::Value, BackendError> {
        let request = self
            .client
            .get(self.url("/users/profile"))
            .query(&[("firebaseUid", firebase_uid)])
            .timeout(self.request_timeout());

        self.send_json(request).await
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the clinic backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl BackendError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::Unavailable(e.to_string())
        } else {
            BackendError::Request(e)
        }
    }
}
