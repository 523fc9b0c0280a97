//! State Management
//!
//! Global application state: session, sidebar status and toasts.

pub mod global;
