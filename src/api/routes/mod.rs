//! API Routes
//!
//! Route handlers organized by page.

pub mod appointments;
pub mod dashboard;
pub mod health;
pub mod medicines;
pub mod prescriptions;
pub mod session;
pub mod status;
pub mod users;
