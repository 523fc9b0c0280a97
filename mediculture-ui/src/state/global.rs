//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api::{DoctorProfile, SystemStatus};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Logged-in doctor; `None` shows the login screen
    pub doctor: RwSignal<Option<DoctorProfile>>,
    /// Backend status shown in the sidebar
    pub system: RwSignal<Option<SystemStatus>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Toast currently on screen
    pub toast: RwSignal<Option<ToastMessage>>,
    toast_seq: RwSignal<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
    Info,
}

impl ToastKind {
    /// How long the toast stays up
    pub fn duration_ms(&self) -> u32 {
        match self {
            ToastKind::Success | ToastKind::Info => 3000,
            ToastKind::Warning | ToastKind::Error => 5000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub kind: ToastKind,
    pub text: String,
    seq: u64,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        doctor: create_rw_signal(None),
        system: create_rw_signal(None),
        loading: create_rw_signal(false),
        toast: create_rw_signal(None),
        toast_seq: create_rw_signal(0),
    };

    provide_context(state);
}

impl GlobalState {
    pub fn is_logged_in(&self) -> bool {
        self.doctor.with(Option::is_some)
    }

    /// Drop everything tied to the session
    pub fn sign_out(&self) {
        self.doctor.set(None);
        self.system.set(None);
    }

    /// Show a toast (auto-clears after its kind's timeout)
    pub fn notify(&self, kind: ToastKind, message: &str) {
        let seq = self.toast_seq.get_untracked() + 1;
        self.toast_seq.set(seq);
        self.toast.set(Some(ToastMessage {
            kind,
            text: message.to_string(),
            seq,
        }));

        // A newer toast owns the slot; only clear our own
        let toast_signal = self.toast;
        gloo_timers::callback::Timeout::new(kind.duration_ms(), move || {
            if toast_signal.get_untracked().map(|t| t.seq) == Some(seq) {
                toast_signal.set(None);
            }
        })
        .forget();
    }

    pub fn show_success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    pub fn show_warning(&self, message: &str) {
        self.notify(ToastKind::Warning, message);
    }

    pub fn show_error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }

    pub fn show_info(&self, message: &str) {
        self.notify(ToastKind::Info, message);
    }

    /// Surface backend read failures that the server folded into the page
    pub fn show_notices(&self, notices: &[String]) {
        if let Some(first) = notices.first() {
            self.show_warning(first);
        }
    }
}
