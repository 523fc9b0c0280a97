//! Appointments View
//!
//! Appointment list filtered by status, one card per appointment, and the
//! status actions available on open appointments.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{date_part, fetch_or_default, format_amount, title_case};
use crate::backend::{
    Appointment, AppointmentQuery, AppointmentStatus, ClinicBackend, Fees, NewAppointment,
};
use crate::session::DoctorProfile;

/// Status filter selected on the appointments page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    /// Parse the filter as sent by the UI ("All", "", or a status name)
    pub fn parse(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::trim) {
            None | Some("") => Ok(StatusFilter::All),
            Some(v) if v.eq_ignore_ascii_case("all") => Ok(StatusFilter::All),
            Some(v) => v.parse().map(StatusFilter::Only),
        }
    }

    /// Labels for the filter dropdown
    pub fn options() -> Vec<String> {
        std::iter::once("All".to_string())
            .chain(AppointmentStatus::all().iter().map(|s| s.to_string()))
            .collect()
    }

    pub fn label(&self) -> String {
        match self {
            StatusFilter::All => "All".to_string(),
            StatusFilter::Only(status) => status.to_string(),
        }
    }

    pub fn to_query(self) -> AppointmentQuery {
        match self {
            StatusFilter::All => AppointmentQuery::default(),
            StatusFilter::Only(status) => AppointmentQuery::with_status(status),
        }
    }
}

/// Operator action on an open appointment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentAction {
    Complete,
    Reschedule,
    Cancel,
}

impl AppointmentAction {
    pub fn all() -> &'static [AppointmentAction] {
        &[
            AppointmentAction::Complete,
            AppointmentAction::Reschedule,
            AppointmentAction::Cancel,
        ]
    }

    pub fn target_status(&self) -> AppointmentStatus {
        match self {
            AppointmentAction::Complete => AppointmentStatus::Completed,
            AppointmentAction::Reschedule => AppointmentStatus::Rescheduled,
            AppointmentAction::Cancel => AppointmentStatus::Cancelled,
        }
    }

    /// Action that moves an appointment into `status`, if any
    pub fn for_status(status: AppointmentStatus) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.target_status() == status)
    }

    /// Message shown once the backend accepted the change
    pub fn confirmation(&self) -> &'static str {
        match self {
            AppointmentAction::Complete => "Appointment marked as completed!",
            AppointmentAction::Reschedule => "Appointment rescheduled!",
            AppointmentAction::Cancel => "Appointment cancelled!",
        }
    }
}

/// One appointment as displayed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppointmentCard {
    pub id: Option<String>,
    pub title: String,
    pub patient_id: String,
    pub doctor: String,
    pub specialty: String,
    pub date: String,
    pub time: String,
    pub kind: String,
    /// Backend status text, "unknown" when missing
    pub status: String,
    pub status_label: String,
    pub fee: String,
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// "name - dosage" per prescribed medicine
    pub prescribed: Vec<String>,
    pub actions: Vec<AppointmentAction>,
}

impl From<&Appointment> for AppointmentCard {
    fn from(apt: &Appointment) -> Self {
        let patient_id = apt.user_id.clone().unwrap_or_else(|| "Unknown".to_string());
        let status_label = apt.status_name().to_uppercase();
        let time = apt.time_slot.clone().unwrap_or_else(|| "Not set".to_string());

        let title = format!(
            "Patient ID: {} - {} ({})",
            patient_id,
            apt.time_slot.as_deref().unwrap_or("No time"),
            status_label
        );

        let prescribed = apt
            .prescribed_medicines()
            .iter()
            .map(|m| {
                format!(
                    "{} - {}",
                    or_default(&m.medicine_name, "Unknown"),
                    or_default(&m.dosage, "Unknown dosage")
                )
            })
            .collect();

        let actions = if apt.lifecycle().is_open() && apt.id.is_some() {
            AppointmentAction::all().to_vec()
        } else {
            Vec::new()
        };

        Self {
            id: apt.id.clone(),
            title,
            patient_id,
            doctor: apt.doctor_name.clone().unwrap_or_else(|| "Unknown".to_string()),
            specialty: apt.specialty.clone().unwrap_or_else(|| "Unknown".to_string()),
            date: date_part(apt.appointment_date.as_deref(), "Not set"),
            time,
            kind: title_case(apt.kind.as_deref().unwrap_or("consultation")),
            status: apt.status_name().to_string(),
            status_label,
            fee: format!("${}", format_amount(apt.total_fee())),
            created: date_part(apt.created_at.as_deref(), "Unknown"),
            symptoms: (!apt.symptoms.is_empty()).then(|| apt.symptoms.join(", ")),
            notes: apt.notes.clone().filter(|n| !n.is_empty()),
            prescribed,
            actions,
        }
    }
}

pub(crate) fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Everything the appointments page renders
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentsView {
    pub filter_options: Vec<String>,
    pub selected_filter: String,
    pub heading: String,
    pub count: usize,
    pub appointments: Vec<AppointmentCard>,
    /// Offer to add a demo appointment when the list is empty
    pub offer_demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub notices: Vec<String>,
}

impl AppointmentsView {
    pub async fn load(backend: &dyn ClinicBackend, filter: StatusFilter) -> Self {
        let mut notices = Vec::new();
        let list = fetch_or_default(
            "appointments",
            backend.list_appointments(&filter.to_query()),
            &mut notices,
        )
        .await;

        let mut view = Self::build(filter, &list.appointments);
        view.notices = notices;
        view
    }

    pub fn build(filter: StatusFilter, appointments: &[Appointment]) -> Self {
        let count = appointments.len();
        let empty = appointments.is_empty();

        Self {
            filter_options: StatusFilter::options(),
            selected_filter: filter.label(),
            heading: format!("Found {} appointments", count),
            count,
            appointments: appointments.iter().map(AppointmentCard::from).collect(),
            offer_demo: empty,
            empty_message: empty
                .then(|| "No appointments found matching your criteria".to_string()),
            notices: Vec::new(),
        }
    }
}

/// Sample appointment for tomorrow, used to seed an empty backend
pub fn demo_appointment(doctor: &DoctorProfile, now: DateTime<Utc>) -> NewAppointment {
    NewAppointment {
        user_id: "user123".to_string(),
        doctor_name: doctor.name.clone(),
        specialty: doctor.specialization.clone(),
        appointment_date: (now + Duration::days(1)).to_rfc3339(),
        time_slot: "10:00 AM".to_string(),
        kind: "consultation".to_string(),
        symptoms: vec!["Headache".to_string(), "Fever".to_string()],
        status: AppointmentStatus::Scheduled,
        notes: None,
        fees: Fees::standard(),
        prescription: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{PrescribedMedicine, Prescription};
    use chrono::TimeZone;

    #[test]
    fn test_filter_parse() {
        assert_eq!(StatusFilter::parse(None).unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("All")).unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("cancelled")).unwrap(),
            StatusFilter::Only(AppointmentStatus::Cancelled)
        );
        assert!(StatusFilter::parse(Some("archived")).is_err());
    }

    #[test]
    fn test_filter_query() {
        assert_eq!(StatusFilter::All.to_query().status, None);
        let query = StatusFilter::Only(AppointmentStatus::Confirmed).to_query();
        assert_eq!(query.status, Some(AppointmentStatus::Confirmed));
        assert_eq!(query.limit, 50);
        assert_eq!(
            StatusFilter::options(),
            vec!["All", "scheduled", "confirmed", "completed", "cancelled", "rescheduled"]
        );
    }

    #[test]
    fn test_card_defaults() {
        let card = AppointmentCard::from(&Appointment::default());

        assert_eq!(card.title, "Patient ID: Unknown - No time (UNKNOWN)");
        assert_eq!(card.doctor, "Unknown");
        assert_eq!(card.date, "Not set");
        assert_eq!(card.time, "Not set");
        assert_eq!(card.kind, "Consultation");
        assert_eq!(card.fee, "$0");
        assert_eq!(card.created, "Unknown");
        assert!(card.symptoms.is_none());
        assert!(card.actions.is_empty());
    }

    #[test]
    fn test_card_full_record() {
        let apt = Appointment {
            id: Some("a9".to_string()),
            user_id: Some("user123".to_string()),
            time_slot: Some("10:00 AM".to_string()),
            kind: Some("follow-up".to_string()),
            status: Some("confirmed".to_string()),
            symptoms: vec!["Headache".to_string(), "Fever".to_string()],
            fees: Some(Fees::standard()),
            prescription: Some(Prescription {
                medicines: vec![PrescribedMedicine {
                    medicine_name: "Ibuprofen".to_string(),
                    ..Default::default()
                }],
                instructions: None,
            }),
            created_at: Some("2024-02-03T04:05:06Z".to_string()),
            ..Default::default()
        };

        let card = AppointmentCard::from(&apt);
        assert_eq!(card.title, "Patient ID: user123 - 10:00 AM (CONFIRMED)");
        assert_eq!(card.kind, "Follow-Up");
        assert_eq!(card.fee, "$300");
        assert_eq!(card.created, "2024-02-03");
        assert_eq!(card.symptoms.as_deref(), Some("Headache, Fever"));
        assert_eq!(card.prescribed, vec!["Ibuprofen - Unknown dosage"]);
        assert_eq!(card.actions.len(), 3);
    }

    #[test]
    fn test_actions_only_on_open_appointments() {
        for status in AppointmentStatus::all() {
            let apt = Appointment {
                id: Some("x".to_string()),
                status: Some(status.to_string()),
                ..Default::default()
            };
            let card = AppointmentCard::from(&apt);
            assert_eq!(!card.actions.is_empty(), status.is_open(), "status {}", status);
        }
    }

    #[test]
    fn test_card_shows_unlisted_status() {
        for (raw, label) in [("pending", "PENDING"), ("no_show", "NO_SHOW")] {
            let apt = Appointment {
                id: Some("x".to_string()),
                time_slot: Some("09:00".to_string()),
                status: Some(raw.to_string()),
                ..Default::default()
            };
            let card = AppointmentCard::from(&apt);
            assert_eq!(card.status, raw);
            assert_eq!(card.status_label, label);
            assert_eq!(card.title, format!("Patient ID: Unknown - 09:00 ({})", label));
            assert!(card.actions.is_empty());
        }
    }

    #[test]
    fn test_action_targets() {
        assert_eq!(
            AppointmentAction::for_status(AppointmentStatus::Cancelled),
            Some(AppointmentAction::Cancel)
        );
        assert_eq!(AppointmentAction::for_status(AppointmentStatus::Scheduled), None);
        assert_eq!(
            AppointmentAction::Reschedule.target_status(),
            AppointmentStatus::Rescheduled
        );
    }

    #[test]
    fn test_empty_view_offers_demo() {
        let view = AppointmentsView::build(StatusFilter::All, &[]);
        assert!(view.offer_demo);
        assert_eq!(view.heading, "Found 0 appointments");
        assert!(view.empty_message.is_some());

        let view = AppointmentsView::build(
            StatusFilter::Only(AppointmentStatus::Scheduled),
            &[Appointment::default()],
        );
        assert!(!view.offer_demo);
        assert_eq!(view.selected_filter, "scheduled");
        assert_eq!(view.heading, "Found 1 appointments");
    }

    #[test]
    fn test_demo_appointment() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let demo = demo_appointment(&DoctorProfile::default(), now);

        assert_eq!(demo.user_id, "user123");
        assert_eq!(demo.doctor_name, "Dr. Sarah Mitchell");
        assert_eq!(demo.specialty, "Internal Medicine");
        assert!(demo.appointment_date.starts_with("2024-06-02T08:30:00"));
        assert_eq!(demo.time_slot, "10:00 AM");
        assert_eq!(demo.status, AppointmentStatus::Scheduled);
        assert_eq!(demo.symptoms, vec!["Headache", "Fever"]);
        assert_eq!(demo.fees.total, 300.0);
    }
}
