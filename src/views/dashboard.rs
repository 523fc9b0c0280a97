//! Dashboard View
//!
//! Overview page: headline counts, appointment status and medicine category
//! distributions, and the five most recently created appointments.

use serde::Serialize;

use super::{count_by, date_part, fetch_health, fetch_or_default, title_case, CountEntry};
use crate::backend::{
    Appointment, AppointmentQuery, AppointmentStatus, ClinicBackend, HealthStatus, Medicine,
    MedicineQuery,
};
use crate::session::DoctorProfile;

/// How many medicines the dashboard samples for the category chart
pub const DASHBOARD_MEDICINE_SAMPLE: u32 = 10;

/// Number of rows in the recent appointments list
pub const RECENT_APPOINTMENTS: usize = 5;

/// Headline numbers across the top of the dashboard
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub scheduled_appointments: usize,
    pub completed_consultations: usize,
    pub available_medicines: u64,
    pub registered_users: u64,
}

/// One row of the recent appointments list
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentAppointment {
    pub patient: String,
    pub date: String,
    pub status: String,
    pub indicator: &'static str,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub greeting: String,
    pub metrics: DashboardMetrics,
    /// Appointment counts per status, in first-seen order
    pub status_distribution: Vec<CountEntry>,
    /// Medicine counts per category, in first-seen order
    pub category_distribution: Vec<CountEntry>,
    pub recent_appointments: Vec<RecentAppointment>,
    /// Raw health record, shown when there is nothing else to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_health: Option<HealthStatus>,
    pub backend_connected: bool,
    pub notices: Vec<String>,
}

impl DashboardView {
    /// Fetch health, appointments and a medicine sample, then build the view
    pub async fn load(backend: &dyn ClinicBackend, doctor: &DoctorProfile) -> Self {
        let mut notices = Vec::new();

        let health = fetch_health(backend).await;
        let appointments = fetch_or_default(
            "appointments",
            backend.list_appointments(&AppointmentQuery::default()),
            &mut notices,
        )
        .await;
        let medicines = fetch_or_default(
            "medicines",
            backend.list_medicines(&MedicineQuery::with_limit(DASHBOARD_MEDICINE_SAMPLE)),
            &mut notices,
        )
        .await;

        let mut view = Self::build(
            doctor,
            health,
            &appointments.appointments,
            &medicines.medicines,
        );
        view.notices = notices;
        view
    }

    pub fn build(
        doctor: &DoctorProfile,
        health: HealthStatus,
        appointments: &[Appointment],
        medicines: &[Medicine],
    ) -> Self {
        let collections = health.collections.unwrap_or_default();

        let metrics = DashboardMetrics {
            scheduled_appointments: count_status(appointments, AppointmentStatus::Scheduled),
            completed_consultations: count_status(appointments, AppointmentStatus::Completed),
            available_medicines: collections
                .medicines
                .unwrap_or(medicines.len() as u64),
            registered_users: collections.users.unwrap_or(0),
        };

        let status_distribution = count_by(appointments, |a| a.status_name().to_string());
        let category_distribution = count_by(medicines, |m| {
            m.category.clone().unwrap_or_else(|| "Unknown".to_string())
        });

        let recent_appointments = recent(appointments);
        let backend_connected = health.is_ok();

        Self {
            greeting: format!("Welcome back, {}!", doctor.name),
            metrics,
            status_distribution,
            category_distribution,
            recent_appointments,
            backend_health: if appointments.is_empty() {
                Some(health)
            } else {
                None
            },
            backend_connected,
            notices: Vec::new(),
        }
    }
}

fn count_status(appointments: &[Appointment], status: AppointmentStatus) -> usize {
    appointments.iter().filter(|a| a.lifecycle() == status).count()
}

/// Most recently created appointments first
fn recent(appointments: &[Appointment]) -> Vec<RecentAppointment> {
    let mut sorted: Vec<&Appointment> = appointments.iter().collect();
    // ISO timestamps sort lexicographically; missing ones sort last
    sorted.sort_by(|a, b| {
        let a_created = a.created_at.as_deref().unwrap_or("");
        let b_created = b.created_at.as_deref().unwrap_or("");
        b_created.cmp(a_created)
    });

    sorted
        .into_iter()
        .take(RECENT_APPOINTMENTS)
        .map(|apt| RecentAppointment {
            patient: apt.user_id.clone().unwrap_or_else(|| "Unknown".to_string()),
            date: date_part(apt.appointment_date.as_deref(), "No date"),
            status: title_case(apt.status_name()),
            indicator: status_indicator(apt.lifecycle()),
        })
        .collect()
}

/// Coloured dot shown next to a status
pub fn status_indicator(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "🟡",
        AppointmentStatus::Completed => "🟢",
        AppointmentStatus::Cancelled => "🔴",
        _ => "⚪",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CollectionCounts;

    fn appointment(user: &str, status: AppointmentStatus, created: Option<&str>) -> Appointment {
        Appointment {
            user_id: Some(user.to_string()),
            status: (status != AppointmentStatus::Unknown).then(|| status.to_string()),
            created_at: created.map(str::to_string),
            appointment_date: Some("2024-06-01T10:00:00Z".to_string()),
            ..Default::default()
        }
    }

    fn medicine(category: Option<&str>) -> Medicine {
        Medicine {
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    fn healthy(collections: Option<CollectionCounts>) -> HealthStatus {
        HealthStatus {
            status: "OK".to_string(),
            collections,
            ..Default::default()
        }
    }

    #[test]
    fn test_metrics_prefer_collection_counts() {
        let appointments = vec![
            appointment("p1", AppointmentStatus::Scheduled, None),
            appointment("p2", AppointmentStatus::Scheduled, None),
            appointment("p3", AppointmentStatus::Completed, None),
            appointment("p4", AppointmentStatus::Cancelled, None),
        ];
        let medicines = vec![medicine(Some("Analgesic"))];
        let collections = CollectionCounts {
            users: Some(42),
            appointments: Some(4),
            medicines: Some(120),
        };

        let view = DashboardView::build(
            &DoctorProfile::default(),
            healthy(Some(collections)),
            &appointments,
            &medicines,
        );

        assert_eq!(view.metrics.scheduled_appointments, 2);
        assert_eq!(view.metrics.completed_consultations, 1);
        assert_eq!(view.metrics.available_medicines, 120);
        assert_eq!(view.metrics.registered_users, 42);
        assert_eq!(view.greeting, "Welcome back, Dr. Sarah Mitchell!");
        assert!(view.backend_health.is_none());
    }

    #[test]
    fn test_metrics_fall_back_without_collections() {
        let medicines = vec![medicine(None), medicine(Some("Antibiotic"))];
        let view = DashboardView::build(
            &DoctorProfile::default(),
            HealthStatus::error("down"),
            &[],
            &medicines,
        );

        assert_eq!(view.metrics.available_medicines, 2);
        assert_eq!(view.metrics.registered_users, 0);
        assert!(!view.backend_connected);
        // No appointments: the raw health record is shown instead
        assert_eq!(view.backend_health.unwrap().status, "Error");
    }

    #[test]
    fn test_distributions() {
        let appointments = vec![
            appointment("p1", AppointmentStatus::Completed, None),
            appointment("p2", AppointmentStatus::Scheduled, None),
            appointment("p3", AppointmentStatus::Completed, None),
            appointment("p4", AppointmentStatus::Unknown, None),
        ];
        let medicines = vec![medicine(Some("Analgesic")), medicine(None), medicine(Some("Analgesic"))];

        let view = DashboardView::build(&DoctorProfile::default(), healthy(None), &appointments, &medicines);

        let statuses: Vec<_> = view
            .status_distribution
            .iter()
            .map(|c| (c.label.as_str(), c.count))
            .collect();
        assert_eq!(statuses, vec![("completed", 2), ("scheduled", 1), ("unknown", 1)]);

        let categories: Vec<_> = view
            .category_distribution
            .iter()
            .map(|c| (c.label.as_str(), c.count))
            .collect();
        assert_eq!(categories, vec![("Analgesic", 2), ("Unknown", 1)]);
    }

    #[test]
    fn test_unlisted_statuses_get_their_own_slice() {
        let appointments: Vec<Appointment> = serde_json::from_str(
            r#"[{"status": "pending"}, {"status": "no_show"}, {"status": "scheduled"},
                {"status": "pending"}, {}]"#,
        )
        .unwrap();

        let view = DashboardView::build(&DoctorProfile::default(), healthy(None), &appointments, &[]);
        let statuses: Vec<_> = view
            .status_distribution
            .iter()
            .map(|c| (c.label.as_str(), c.count))
            .collect();
        assert_eq!(
            statuses,
            vec![("pending", 2), ("no_show", 1), ("scheduled", 1), ("unknown", 1)]
        );
        assert_eq!(view.metrics.scheduled_appointments, 1);
    }

    #[test]
    fn test_recent_appointments_newest_first() {
        let appointments = vec![
            appointment("old", AppointmentStatus::Completed, Some("2024-01-01T00:00:00Z")),
            appointment("none", AppointmentStatus::Scheduled, None),
            appointment("new", AppointmentStatus::Scheduled, Some("2024-05-01T00:00:00Z")),
            appointment("mid", AppointmentStatus::Cancelled, Some("2024-03-01T00:00:00Z")),
            appointment("mid2", AppointmentStatus::Confirmed, Some("2024-02-01T00:00:00Z")),
            appointment("mid3", AppointmentStatus::Rescheduled, Some("2024-02-15T00:00:00Z")),
        ];

        let view = DashboardView::build(&DoctorProfile::default(), healthy(None), &appointments, &[]);
        let patients: Vec<_> = view
            .recent_appointments
            .iter()
            .map(|r| r.patient.as_str())
            .collect();

        assert_eq!(patients, vec!["new", "mid", "mid3", "mid2", "old"]);
        assert_eq!(view.recent_appointments[0].indicator, "🟡");
        assert_eq!(view.recent_appointments[1].indicator, "🔴");
        assert_eq!(view.recent_appointments[2].indicator, "⚪");
        assert_eq!(view.recent_appointments[0].status, "Scheduled");
        assert_eq!(view.recent_appointments[0].date, "2024-06-01");
    }
}
