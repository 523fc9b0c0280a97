//! Clinic Backend Integration
//!
//! The clinic backend (Node.js/MongoDB) owns every appointment, medicine and
//! user record. This module is the portal's only way to reach it.
//!
//! ## Architecture
//!
//! - **ClinicBackend**: trait with one operation per backend endpoint
//! - **BackendClient**: reqwest implementation with fixed per-call timeouts
//! - **types**: wire types in the backend's camelCase JSON
//!
//! ## Endpoints
//!
//! - `GET /health`
//! - `GET /appointments`, `POST /appointments`
//! - `PATCH /appointments/{id}/status`
//! - `GET /medicines`, `GET /medicines/categories/list`
//! - `GET /users/profile`

mod client;
mod types;

pub use client::{BackendClient, BackendConfig, BackendError, ClinicBackend};
pub use types::{
    Appointment, AppointmentList, AppointmentQuery, AppointmentStatus, CollectionCounts, Fees,
    HealthStatus, Medicine, MedicineList, MedicineQuery, NewAppointment, Pagination,
    PrescribedMedicine, Prescription, Rating, HEALTHY_STATUS,
};
