//! Portal Views
//!
//! View models for the portal's pages. Each page fetches what it needs from
//! the backend and maps the records straight onto display fields, with at
//! most a status filter or a group-by count in between.
//!
//! A read that fails does not fail the page: the error is logged, a notice
//! is added for the operator, and the page renders with an empty result.
//!
//! - [`dashboard`]: metrics, status/category charts, recent appointments
//! - [`appointments`]: filtered appointment cards and status actions
//! - [`medicines`]: catalog search and medicine cards
//! - [`prescriptions`]: prescription form and history
//! - [`status`]: sidebar backend status

pub mod appointments;
pub mod dashboard;
pub mod medicines;
pub mod prescriptions;
pub mod status;

pub use appointments::{AppointmentAction, AppointmentCard, AppointmentsView, StatusFilter};
pub use dashboard::{DashboardMetrics, DashboardView, RecentAppointment};
pub use medicines::{MedicineCard, MedicineSearch, MedicinesView};
pub use prescriptions::{
    FormError, MedicineRow, PrescriptionCreated, PrescriptionForm, PrescriptionHistory,
    PrescriptionHistoryEntry,
};
pub use status::SystemStatus;

use serde::Serialize;
use std::future::Future;

use crate::backend::{BackendError, ClinicBackend, HealthStatus};

/// One bar or slice of a chart
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// Count items per key, keeping keys in first-seen order
pub fn count_by<T, F>(items: &[T], key: F) -> Vec<CountEntry>
where
    F: Fn(&T) -> String,
{
    let mut counts: Vec<CountEntry> = Vec::new();

    for item in items {
        let label = key(item);
        match counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(CountEntry { label, count: 1 }),
        }
    }

    counts
}

/// Await a backend read, falling back to the empty value on failure
///
/// The failure is logged and recorded in `notices` as
/// "Error fetching {what}: {error}".
pub async fn fetch_or_default<T, F>(what: &str, read: F, notices: &mut Vec<String>) -> T
where
    T: Default,
    F: Future<Output = Result<T, BackendError>>,
{
    match read.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, resource = what, "Backend read failed, showing empty result");
            notices.push(format!("Error fetching {}: {}", what, e));
            T::default()
        }
    }
}

/// Backend health, or a synthetic error status when unreachable
pub async fn fetch_health(backend: &dyn ClinicBackend) -> HealthStatus {
    match backend.health().await {
        Ok(health) => health,
        Err(e) => {
            tracing::warn!(error = %e, "Backend health check failed");
            HealthStatus::error(e.to_string())
        }
    }
}

/// First 10 characters (the date part) of an ISO timestamp
pub fn date_part(timestamp: Option<&str>, fallback: &str) -> String {
    match timestamp.filter(|t| !t.is_empty()) {
        Some(t) => t.chars().take(10).collect(),
        None => fallback.to_string(),
    }
}

/// Capitalise the first letter of each word ("follow-up" -> "Follow-Up")
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

/// Format an amount without trailing zeros for whole numbers
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Non-empty trimmed text, or None
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
