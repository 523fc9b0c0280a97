//! API Client Module
//!
//! HTTP client for the Mediculture portal server.

pub mod client;

pub use client::*;
