//! # Mediculture
//!
//! Doctor portal for the Mediculture clinic backend. Appointments,
//! prescriptions and the medicine catalog all live in the backend; the portal
//! fetches them, shapes them for display and sends the doctor's changes back.
//!
//! ## Features
//!
//! - **Dashboard**: headline counts, status and category charts, recent appointments
//! - **Appointments**: status filter and complete/reschedule/cancel actions
//! - **Medicines**: catalog search with price, stock and rating details
//! - **Prescriptions**: create prescriptions and browse past ones
//! - **Demo login**: a configurable demo doctor, no credential checks
//!
//! ## Modules
//!
//! - [`backend`]: REST client for the clinic backend
//! - [`session`]: In-memory demo sessions
//! - [`views`]: Page view models built from backend records
//! - [`api`]: REST API server with Axum, consumed by the web UI
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mediculture::backend::{BackendClient, BackendConfig};
//! use mediculture::session::DoctorProfile;
//! use mediculture::views::DashboardView;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = BackendClient::new(BackendConfig::default())?;
//!
//!     let dashboard = DashboardView::load(&backend, &DoctorProfile::default()).await;
//!     println!("{}", dashboard.greeting);
//!     println!("Scheduled: {}", dashboard.metrics.scheduled_appointments);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use backend::{
    Appointment, AppointmentStatus, BackendClient, BackendConfig, BackendError, ClinicBackend,
    HealthStatus, Medicine, NewAppointment,
};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};

pub use session::{DoctorProfile, Session, SessionLimits, SessionStore};

pub use views::{
    AppointmentsView, DashboardView, MedicinesView, PrescriptionForm, PrescriptionHistory,
    SystemStatus,
};
