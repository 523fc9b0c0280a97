//! Prescriptions View
//!
//! Prescriptions are stored as completed appointments carrying an embedded
//! prescription. Creating one posts such an appointment; the history lists
//! completed appointments that have at least one prescribed medicine.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::appointments::or_default;
use super::{date_part, fetch_or_default, non_empty, title_case};
use crate::backend::{
    Appointment, AppointmentQuery, AppointmentStatus, ClinicBackend, Fees, NewAppointment,
    PrescribedMedicine, Prescription,
};
use crate::session::DoctorProfile;

/// Consultation types offered on the form
pub const CONSULTATION_TYPES: [&str; 4] = ["consultation", "checkup", "follow-up", "emergency"];

/// Upper bound on medicine rows per prescription
pub const MAX_MEDICINE_ROWS: usize = 10;

/// Prescription form validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in Patient ID and Doctor Name")]
    MissingRequired,

    #[error("Unknown consultation type: {0}")]
    UnknownType(String),

    #[error("At most {MAX_MEDICINE_ROWS} medicines per prescription, got {0}")]
    TooManyMedicines(usize),

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),
}

/// One medicine row on the form
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MedicineRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub duration: String,
}

/// Prescription form as submitted by the UI
#[derive(Debug, Clone, Deserialize)]
pub struct PrescriptionForm {
    /// Patient's Firebase UID
    #[serde(default)]
    pub patient_id: String,
    /// Defaults to the logged-in doctor when omitted
    #[serde(default)]
    pub doctor_name: Option<String>,
    /// Defaults to the logged-in doctor's specialization when omitted
    #[serde(default)]
    pub specialty: Option<String>,
    pub date: NaiveDate,
    /// "HH:MM" or "HH:MM:SS"
    pub time: String,
    #[serde(default = "default_consultation_type")]
    pub consultation_type: String,
    /// One symptom per line
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub medicines: Vec<MedicineRow>,
    #[serde(default)]
    pub notes: String,
}

fn default_consultation_type() -> String {
    "consultation".to_string()
}

fn parse_time(value: &str) -> Result<NaiveTime, FormError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime(value.to_string()))
}

impl PrescriptionForm {
    /// Validate the form and turn it into a completed appointment
    pub fn into_appointment(self, doctor: &DoctorProfile) -> Result<NewAppointment, FormError> {
        let doctor_name = match self.doctor_name {
            Some(name) => name.trim().to_string(),
            None => doctor.name.clone(),
        };
        let patient_id = self.patient_id.trim().to_string();

        if patient_id.is_empty() || doctor_name.is_empty() {
            return Err(FormError::MissingRequired);
        }

        if !CONSULTATION_TYPES.contains(&self.consultation_type.as_str()) {
            return Err(FormError::UnknownType(self.consultation_type));
        }

        if self.medicines.len() > MAX_MEDICINE_ROWS {
            return Err(FormError::TooManyMedicines(self.medicines.len()));
        }

        let time = parse_time(&self.time)?;
        let time_slot = time.format("%H:%M").to_string();

        let symptoms = self
            .symptoms
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        // Rows without a medicine name are left-over blanks
        let medicines = self
            .medicines
            .into_iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| PrescribedMedicine {
                medicine_name: row.name.trim().to_string(),
                dosage: row.dosage.trim().to_string(),
                frequency: row.frequency.trim().to_string(),
                duration: row.duration.trim().to_string(),
            })
            .collect();

        let notes = self.notes.trim().to_string();

        Ok(NewAppointment {
            user_id: patient_id,
            doctor_name,
            specialty: self
                .specialty
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| doctor.specialization.clone()),
            appointment_date: format!("{}T{}:00Z", self.date.format("%Y-%m-%d"), time_slot),
            time_slot,
            kind: self.consultation_type,
            symptoms,
            status: AppointmentStatus::Completed,
            notes: Some(notes.clone()),
            fees: Fees::standard(),
            prescription: Some(Prescription {
                medicines,
                instructions: Some(notes),
            }),
        })
    }
}

/// Result of a successful prescription submission
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionCreated {
    pub message: String,
    /// Record as echoed by the backend
    pub appointment: serde_json::Value,
}

impl PrescriptionCreated {
    pub fn new(appointment: serde_json::Value) -> Self {
        Self {
            message: "Prescription created successfully!".to_string(),
            appointment,
        }
    }
}

/// Prescribed medicine with placeholders filled in
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MedicineLine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

impl From<&PrescribedMedicine> for MedicineLine {
    fn from(m: &PrescribedMedicine) -> Self {
        Self {
            name: or_default(&m.medicine_name, "Unknown").to_string(),
            dosage: or_default(&m.dosage, "Not specified").to_string(),
            frequency: or_default(&m.frequency, "Not specified").to_string(),
            duration: or_default(&m.duration, "Not specified").to_string(),
        }
    }
}

/// One past prescription
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrescriptionHistoryEntry {
    pub title: String,
    pub patient: String,
    pub doctor: String,
    pub date: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub medicines: Vec<MedicineLine>,
}

impl From<&Appointment> for PrescriptionHistoryEntry {
    fn from(apt: &Appointment) -> Self {
        let patient = apt.user_id.clone().unwrap_or_default();

        Self {
            title: format!(
                "Patient: {} - {}",
                patient,
                date_part(apt.appointment_date.as_deref(), "No date")
            ),
            patient,
            doctor: apt.doctor_name.clone().unwrap_or_default(),
            date: date_part(apt.appointment_date.as_deref(), "Unknown"),
            kind: title_case(apt.kind.as_deref().unwrap_or("consultation")),
            symptoms: (!apt.symptoms.is_empty()).then(|| apt.symptoms.join(", ")),
            notes: non_empty(apt.notes.as_deref()),
            medicines: apt.prescribed_medicines().iter().map(MedicineLine::from).collect(),
        }
    }
}

/// Prescription history tab
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionHistory {
    pub prescriptions: Vec<PrescriptionHistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    /// Form choices for the create tab
    pub consultation_types: Vec<String>,
    pub max_medicines: usize,
    pub notices: Vec<String>,
}

impl PrescriptionHistory {
    pub async fn load(backend: &dyn ClinicBackend) -> Self {
        let mut notices = Vec::new();
        let list = fetch_or_default(
            "prescription history",
            backend.list_appointments(&AppointmentQuery::with_status(AppointmentStatus::Completed)),
            &mut notices,
        )
        .await;

        let mut view = Self::build(&list.appointments);
        view.notices = notices;
        view
    }

    pub fn build(appointments: &[Appointment]) -> Self {
        let prescriptions: Vec<PrescriptionHistoryEntry> = appointments
            .iter()
            .filter(|a| a.has_prescription())
            .map(PrescriptionHistoryEntry::from)
            .collect();

        Self {
            empty_message: prescriptions
                .is_empty()
                .then(|| "No prescriptions found".to_string()),
            prescriptions,
            consultation_types: CONSULTATION_TYPES.iter().map(|t| t.to_string()).collect(),
            max_medicines: MAX_MEDICINE_ROWS,
            notices: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PrescriptionForm {
        PrescriptionForm {
            patient_id: "user123".to_string(),
            doctor_name: None,
            specialty: None,
            date: NaiveDate::from_ymd_opt(2024, 7, 9).unwrap(),
            time: "14:30".to_string(),
            consultation_type: "checkup".to_string(),
            symptoms: "Headache\n\n  Fever  \n".to_string(),
            medicines: vec![
                MedicineRow {
                    name: "Paracetamol".to_string(),
                    dosage: "500mg".to_string(),
                    frequency: "Twice daily".to_string(),
                    duration: "7 days".to_string(),
                },
                MedicineRow::default(),
            ],
            notes: "Drink water".to_string(),
        }
    }

    #[test]
    fn test_form_builds_completed_appointment() {
        let apt = form().into_appointment(&DoctorProfile::default()).unwrap();

        assert_eq!(apt.user_id, "user123");
        assert_eq!(apt.doctor_name, "Dr. Sarah Mitchell");
        assert_eq!(apt.specialty, "Internal Medicine");
        assert_eq!(apt.appointment_date, "2024-07-09T14:30:00Z");
        assert_eq!(apt.time_slot, "14:30");
        assert_eq!(apt.kind, "checkup");
        assert_eq!(apt.status, AppointmentStatus::Completed);
        assert_eq!(apt.symptoms, vec!["Headache", "Fever"]);
        assert_eq!(apt.fees, Fees::standard());

        let prescription = apt.prescription.unwrap();
        assert_eq!(prescription.medicines.len(), 1);
        assert_eq!(prescription.medicines[0].medicine_name, "Paracetamol");
        assert_eq!(prescription.instructions.as_deref(), Some("Drink water"));
    }

    #[test]
    fn test_form_requires_patient_and_doctor() {
        let mut missing_patient = form();
        missing_patient.patient_id = "  ".to_string();
        assert_eq!(
            missing_patient.into_appointment(&DoctorProfile::default()),
            Err(FormError::MissingRequired)
        );

        let mut blank_doctor = form();
        blank_doctor.doctor_name = Some(String::new());
        assert_eq!(
            blank_doctor.into_appointment(&DoctorProfile::default()),
            Err(FormError::MissingRequired)
        );
    }

    #[test]
    fn test_form_rejects_bad_input() {
        let mut bad_type = form();
        bad_type.consultation_type = "surgery".to_string();
        assert_eq!(
            bad_type.into_appointment(&DoctorProfile::default()),
            Err(FormError::UnknownType("surgery".to_string()))
        );

        let mut too_many = form();
        too_many.medicines = vec![MedicineRow::default(); 11];
        assert_eq!(
            too_many.into_appointment(&DoctorProfile::default()),
            Err(FormError::TooManyMedicines(11))
        );

        let mut bad_time = form();
        bad_time.time = "half past two".to_string();
        assert!(matches!(
            bad_time.into_appointment(&DoctorProfile::default()),
            Err(FormError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_form_accepts_seconds() {
        let mut with_seconds = form();
        with_seconds.time = "09:05:00".to_string();
        let apt = with_seconds.into_appointment(&DoctorProfile::default()).unwrap();
        assert_eq!(apt.time_slot, "09:05");
    }

    #[test]
    fn test_form_from_json() {
        let json = r#"{"patient_id": "p1", "date": "2024-01-02", "time": "08:00"}"#;
        let form: PrescriptionForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.consultation_type, "consultation");
        assert!(form.medicines.is_empty());
    }

    #[test]
    fn test_history_keeps_only_prescriptions() {
        let with_rx = Appointment {
            user_id: Some("p1".to_string()),
            doctor_name: Some("Dr. A".to_string()),
            appointment_date: Some("2024-04-04T10:00:00Z".to_string()),
            status: Some("completed".to_string()),
            prescription: Some(Prescription {
                medicines: vec![PrescribedMedicine {
                    medicine_name: "Cetirizine".to_string(),
                    dosage: "10mg".to_string(),
                    ..Default::default()
                }],
                instructions: None,
            }),
            ..Default::default()
        };
        let empty_rx = Appointment {
            prescription: Some(Prescription::default()),
            ..Default::default()
        };

        let history = PrescriptionHistory::build(&[with_rx, empty_rx, Appointment::default()]);
        assert_eq!(history.prescriptions.len(), 1);

        let entry = &history.prescriptions[0];
        assert_eq!(entry.title, "Patient: p1 - 2024-04-04");
        assert_eq!(entry.kind, "Consultation");
        assert_eq!(entry.medicines[0].dosage, "10mg");
        assert_eq!(entry.medicines[0].frequency, "Not specified");
        assert!(history.empty_message.is_none());

        let none = PrescriptionHistory::build(&[]);
        assert_eq!(none.empty_message.as_deref(), Some("No prescriptions found"));
        assert_eq!(none.consultation_types.len(), 4);
    }
}
