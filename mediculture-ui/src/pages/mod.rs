//! Pages
//!
//! Top-level page components for each route.

pub mod login;
pub mod dashboard;
pub mod appointments;
pub mod medicines;
pub mod prescriptions;

pub use login::Login;
pub use dashboard::Dashboard;
pub use appointments::Appointments;
pub use medicines::Medicines;
pub use prescriptions::Prescriptions;
