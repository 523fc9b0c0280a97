//! Mediculture Portal API
//!
//! HTTP API the portal UI talks to, built with Axum. Every page endpoint
//! returns a ready-to-render view model; the clinic backend is only ever
//! reached through [`crate::backend::ClinicBackend`].
//!
//! # Endpoints
//!
//! ## Session
//! - `POST /api/v1/session/login` - Demo login
//! - `POST /api/v1/session/logout` - Logout
//! - `GET /api/v1/session` - Current session
//!
//! ## Pages
//! - `GET /api/v1/status` - Sidebar profile and backend status
//! - `GET /api/v1/dashboard` - Dashboard
//! - `GET /api/v1/appointments?status=` - Appointments
//! - `POST /api/v1/appointments/demo` - Add demo appointment
//! - `PATCH /api/v1/appointments/:id/status` - Complete, reschedule or cancel
//! - `GET /api/v1/medicines?search=&category=&searched=` - Medicines
//! - `GET /api/v1/medicines/categories` - Medicine categories
//! - `GET /api/v1/prescriptions` - Prescription history
//! - `POST /api/v1/prescriptions` - Create prescription
//! - `GET /api/v1/users/profile?firebaseUid=` - User profile
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Everything under `/api/v1` except login needs `Authorization: Bearer
//! <session id>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediculture::api::{serve, AppState};
//! use mediculture::backend::{BackendClient, BackendConfig};
//! use mediculture::config::ServerConfig;
//! use mediculture::session::SessionStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(BackendClient::new(BackendConfig::default())?);
//!     let config = ServerConfig::default();
//!
//!     let state = AppState::new(backend, SessionStore::default());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Session routes
        .route("/session", get(routes::session::current))
        .route("/session/login", post(routes::session::login))
        .route("/session/logout", post(routes::session::logout))
        // Page routes
        .route("/status", get(routes::status::sidebar))
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/appointments", get(routes::appointments::list_appointments))
        .route(
            "/appointments/demo",
            post(routes::appointments::create_demo_appointment),
        )
        .route(
            "/appointments/:id/status",
            patch(routes::appointments::update_status),
        )
        .route("/medicines", get(routes::medicines::list_medicines))
        .route("/medicines/categories", get(routes::medicines::list_categories))
        .route(
            "/prescriptions",
            get(routes::prescriptions::history).post(routes::prescriptions::create_prescription),
        )
        .route("/users/profile", get(routes::users::profile));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // UI is served from its own origin
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Mediculture portal API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Mediculture portal API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{
        Appointment, AppointmentList, AppointmentQuery, AppointmentStatus, BackendError,
        ClinicBackend, CollectionCounts, HealthStatus, Medicine, MedicineList, MedicineQuery,
        NewAppointment, PrescribedMedicine, Prescription,
    };
    use crate::session::SessionStore;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::util::ServiceExt;

    /// In-memory clinic backend recording every write
    #[derive(Default)]
    struct StubBackend {
        down: bool,
        appointments: Vec<Appointment>,
        medicines: Vec<Medicine>,
        created: Mutex<Vec<NewAppointment>>,
        updates: Mutex<Vec<(String, AppointmentStatus)>>,
        queries: Mutex<Vec<AppointmentQuery>>,
    }

    #[async_trait]
    impl ClinicBackend for StubBackend {
        async fn health(&self) -> Result<HealthStatus, BackendError> {
            if self.down {
                return Err(BackendError::Unavailable("connection refused".to_string()));
            }
            Ok(HealthStatus {
                status: "OK".to_string(),
                database: Some("mediculture".to_string()),
                collections: Some(CollectionCounts {
                    users: Some(3),
                    appointments: Some(self.appointments.len() as u64),
                    medicines: Some(self.medicines.len() as u64),
                }),
                ..Default::default()
            })
        }

        async fn list_appointments(
            &self,
            query: &AppointmentQuery,
        ) -> Result<AppointmentList, BackendError> {
            if self.down {
                return Err(BackendError::Timeout);
            }
            self.queries.lock().unwrap().push(query.clone());
            let appointments = self
                .appointments
                .iter()
                .filter(|a| query.status.map_or(true, |s| a.lifecycle() == s))
                .cloned()
                .collect();
            Ok(AppointmentList { appointments })
        }

        async fn update_appointment_status(
            &self,
            appointment_id: &str,
            status: AppointmentStatus,
        ) -> Result<(), BackendError> {
            if appointment_id == "missing" {
                return Err(BackendError::Status {
                    status: 404,
                    message: "Appointment not found".to_string(),
                });
            }
            self.updates
                .lock()
                .unwrap()
                .push((appointment_id.to_string(), status));
            Ok(())
        }

        async fn create_appointment(
            &self,
            appointment: &NewAppointment,
        ) -> Result<Value, BackendError> {
            if self.down {
                return Err(BackendError::Status {
                    status: 500,
                    message: "write failed".to_string(),
                });
            }
            self.created.lock().unwrap().push(appointment.clone());
            let mut record = serde_json::to_value(appointment).unwrap();
            record["_id"] = Value::from("new1");
            Ok(record)
        }

        async fn list_medicines(&self, _query: &MedicineQuery) -> Result<MedicineList, BackendError> {
            Ok(MedicineList {
                medicines: self.medicines.clone(),
                ..Default::default()
            })
        }

        async fn medicine_categories(&self) -> Result<Vec<String>, BackendError> {
            if self.down {
                return Err(BackendError::Timeout);
            }
            Ok(vec!["Analgesic".to_string(), "Antibiotic".to_string()])
        }

        async fn user_profile(&self, firebase_uid: &str) -> Result<Value, BackendError> {
            if self.down {
                return Err(BackendError::Timeout);
            }
            Ok(serde_json::json!({ "firebaseUid": firebase_uid, "name": "Jane Doe" }))
        }
    }

    fn sample_backend() -> StubBackend {
        StubBackend {
            appointments: vec![
                Appointment {
                    id: Some("a1".to_string()),
                    user_id: Some("p1".to_string()),
                    status: Some("scheduled".to_string()),
                    ..Default::default()
                },
                Appointment {
                    id: Some("a2".to_string()),
                    user_id: Some("p2".to_string()),
                    status: Some("completed".to_string()),
                    prescription: Some(Prescription {
                        medicines: vec![PrescribedMedicine {
                            medicine_name: "Ibuprofen".to_string(),
                            dosage: "200mg".to_string(),
                            ..Default::default()
                        }],
                        instructions: None,
                    }),
                    ..Default::default()
                },
            ],
            medicines: vec![Medicine {
                name: Some("Ibuprofen".to_string()),
                category: Some("Analgesic".to_string()),
                stock: 5,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn create_test_app(backend: Arc<StubBackend>) -> Router {
        let state = AppState::new(backend, SessionStore::default());
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Log in and return the session id
    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/session/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"email": "doc@clinic.org", "password": "x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["doctor"]["email"], "doc@clinic.org");
        body["session_id"].as_str().unwrap().to_string()
    }

    fn authed(method: &str, uri: &str, session: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {}", session));

        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app(Arc::new(sample_backend()));

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_readiness_follows_backend() {
        let app = create_test_app(Arc::new(StubBackend {
            down: true,
            ..Default::default()
        }));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["backend"]["label"], "Backend: Disconnected");
    }

    #[tokio::test]
    async fn test_login_requires_backend() {
        let app = create_test_app(Arc::new(StubBackend {
            down: true,
            ..Default::default()
        }));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/session/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            "Service unavailable: Cannot connect to backend server"
        );
    }

    #[tokio::test]
    async fn test_pages_require_session() {
        let app = create_test_app(Arc::new(sample_backend()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/v1/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let unknown = uuid::Uuid::new_v4().to_string();
        let response = app
            .oneshot(authed("GET", "/api/v1/appointments", &unknown, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = create_test_app(Arc::new(sample_backend()));
        let session = login(&app).await;

        let response = app
            .clone()
            .oneshot(authed("GET", "/api/v1/session", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["doctor"]["name"], "Dr. Sarah Mitchell");

        let response = app
            .clone()
            .oneshot(authed("POST", "/api/v1/session/logout", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(authed("GET", "/api/v1/session", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sidebar_and_dashboard() {
        let app = create_test_app(Arc::new(sample_backend()));
        let session = login(&app).await;

        let response = app
            .clone()
            .oneshot(authed("GET", "/api/v1/status", &session, None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["system"]["label"], "Backend: Connected");
        assert_eq!(body["system"]["database"], "mediculture");
        assert_eq!(body["doctor"]["license"], "MD12345");

        let response = app
            .oneshot(authed("GET", "/api/v1/dashboard", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["metrics"]["scheduled_appointments"], 1);
        assert_eq!(body["metrics"]["completed_consultations"], 1);
        assert_eq!(body["metrics"]["registered_users"], 3);
        assert_eq!(body["recent_appointments"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_appointments_filter() {
        let backend = Arc::new(sample_backend());
        let app = create_test_app(backend.clone());
        let session = login(&app).await;

        let response = app
            .clone()
            .oneshot(authed("GET", "/api/v1/appointments?status=completed", &session, None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["heading"], "Found 1 appointments");
        assert_eq!(body["selected_filter"], "completed");
        assert_eq!(
            backend.queries.lock().unwrap().last().unwrap().status,
            Some(AppointmentStatus::Completed)
        );

        let response = app
            .oneshot(authed("GET", "/api/v1/appointments?status=bogus", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_status() {
        let backend = Arc::new(sample_backend());
        let app = create_test_app(backend.clone());
        let session = login(&app).await;

        let response = app
            .clone()
            .oneshot(authed(
                "PATCH",
                "/api/v1/appointments/a1/status",
                &session,
                Some(r#"{"status": "cancelled"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Appointment cancelled!");
        assert_eq!(
            backend.updates.lock().unwrap().as_slice(),
            &[("a1".to_string(), AppointmentStatus::Cancelled)]
        );

        // Only completed, rescheduled and cancelled are targets
        let response = app
            .clone()
            .oneshot(authed(
                "PATCH",
                "/api/v1/appointments/a1/status",
                &session,
                Some(r#"{"status": "scheduled"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(authed(
                "PATCH",
                "/api/v1/appointments/missing/status",
                &session,
                Some(r#"{"status": "completed"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(backend.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_demo_appointment() {
        let backend = Arc::new(sample_backend());
        let app = create_test_app(backend.clone());
        let session = login(&app).await;

        let response = app
            .oneshot(authed("POST", "/api/v1/appointments/demo", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Demo appointment created!");
        assert_eq!(body["appointment"]["_id"], "new1");

        let created = backend.created.lock().unwrap();
        assert_eq!(created[0].user_id, "user123");
        assert_eq!(created[0].doctor_name, "Dr. Sarah Mitchell");
        assert_eq!(created[0].status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_create_prescription() {
        let backend = Arc::new(sample_backend());
        let app = create_test_app(backend.clone());
        let session = login(&app).await;

        let form = r#"{
            "patient_id": "p9",
            "date": "2024-08-01",
            "time": "11:15",
            "consultation_type": "follow-up",
            "symptoms": "Cough\nSore throat",
            "medicines": [
                {"name": "Amoxicillin", "dosage": "500mg", "frequency": "3x daily", "duration": "5 days"},
                {"name": "", "dosage": "", "frequency": "", "duration": ""}
            ],
            "notes": "Rest"
        }"#;

        let response = app
            .clone()
            .oneshot(authed("POST", "/api/v1/prescriptions", &session, Some(form)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Prescription created successfully!");

        {
            let created = backend.created.lock().unwrap();
            assert_eq!(created[0].appointment_date, "2024-08-01T11:15:00Z");
            assert_eq!(created[0].status, AppointmentStatus::Completed);
            assert_eq!(created[0].prescription.as_ref().unwrap().medicines.len(), 1);
        }

        let response = app
            .oneshot(authed(
                "POST",
                "/api/v1/prescriptions",
                &session,
                Some(r#"{"patient_id": "", "date": "2024-08-01", "time": "11:15"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_prescription_history() {
        let app = create_test_app(Arc::new(sample_backend()));
        let session = login(&app).await;

        let response = app
            .oneshot(authed("GET", "/api/v1/prescriptions", &session, None))
            .await
            .unwrap();
        let body = body_json(response).await;
        let prescriptions = body["prescriptions"].as_array().unwrap();
        assert_eq!(prescriptions.len(), 1);
        assert_eq!(prescriptions[0]["patient"], "p2");
    }

    #[tokio::test]
    async fn test_medicines_and_categories() {
        let app = create_test_app(Arc::new(sample_backend()));
        let session = login(&app).await;

        let response = app
            .clone()
            .oneshot(authed(
                "GET",
                "/api/v1/medicines?search=ibu&category=All&searched=true",
                &session,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["heading"], "Found 1 medicines");
        assert_eq!(body["categories"][0], "All");
        assert_eq!(body["medicines"][0]["stock_label"], "In Stock: 5");

        let response = app
            .oneshot(authed("GET", "/api/v1/medicines/categories", &session, None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["categories"], serde_json::json!(["Analgesic", "Antibiotic"]));
    }

    #[tokio::test]
    async fn test_reads_fall_back_when_backend_fails() {
        // Login needs a healthy backend, so the session is created directly
        let sessions = SessionStore::default();
        let session = sessions.login(None).await.id.to_string();
        let state = AppState::new(
            Arc::new(StubBackend {
                down: true,
                ..Default::default()
            }),
            sessions,
        );
        let app = build_router(state);

        let response = app
            .clone()
            .oneshot(authed("GET", "/api/v1/appointments", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 0);
        assert_eq!(body["offer_demo"], true);
        assert_eq!(
            body["notices"][0],
            "Error fetching appointments: Request timeout"
        );

        let response = app
            .clone()
            .oneshot(authed("GET", "/api/v1/users/profile?firebaseUid=u1", &session, None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["profile"], serde_json::json!({}));

        // Writes report the failure instead
        let response = app
            .oneshot(authed("POST", "/api/v1/appointments/demo", &session, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "BACKEND_ERROR");
    }
}
