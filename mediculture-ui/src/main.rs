//! Mediculture Doctor Portal
//!
//! Browser front end for the Mediculture portal server, built with Leptos (WASM).
//!
//! # Features
//!
//! - Dashboard with appointment and catalog charts
//! - Appointment list with status actions
//! - Medicine catalog search
//! - Prescription writing and history
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the portal server's REST API over HTTP; the
//! portal server in turn talks to the clinic backend.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
