//! Toast
//!
//! Renders the single pending `ToastMessage` from global state. The timer
//! that clears it lives in `GlobalState::notify`.

use leptos::*;

use crate::state::global::{GlobalState, ToastKind};

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed bottom-6 right-4 z-50">
            {move || state.toast.get().map(|toast| view! { <ToastBody text=toast.text kind=toast.kind /> })}
        </div>
    }
}

fn kind_style(kind: ToastKind) -> (&'static str, &'static str) {
    match kind {
        ToastKind::Success => ("✓", "bg-green-600"),
        ToastKind::Warning => ("⚠", "bg-yellow-600"),
        ToastKind::Error => ("✕", "bg-red-600"),
        ToastKind::Info => ("ℹ", "bg-blue-600"),
    }
}

#[component]
fn ToastBody(text: String, kind: ToastKind) -> impl IntoView {
    let (icon, background) = kind_style(kind);

    view! {
        <div class=format!(
            "flex items-center space-x-3 {background} text-white px-4 py-3 rounded-lg shadow-lg animate-slide-in"
        )>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{text}</span>
        </div>
    }
}
