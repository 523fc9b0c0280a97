//! Sidebar Component
//!
//! Doctor profile, backend status, quick actions and logout.

use leptos::*;

use crate::api::{self, CollectionCounts, DoctorProfile, SystemStatus};
use crate::state::global::GlobalState;

/// Sidebar shown beside every page
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Refresh the backend status whenever the sidebar mounts
    let state_for_fetch = state.clone();
    create_effect(move |_| {
        let state = state_for_fetch.clone();
        spawn_local(async move {
            match api::fetch_sidebar().await {
                Ok(sidebar) => {
                    state.doctor.set(Some(sidebar.doctor));
                    state.system.set(Some(sidebar.system));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch status: {}", e).into());
                    if api::stored_session().is_none() {
                        state.sign_out();
                    }
                }
            }
        });
    });

    let state_for_emergency = state.clone();
    let emergency = move |_| state_for_emergency.show_error("Emergency alert system activated!");

    let state_for_settings = state.clone();
    let settings = move |_| state_for_settings.show_info("Settings panel (Coming Soon)");

    let doctor = state.doctor;
    let system = state.system;
    let logout = move |_| {
        let state = state.clone();
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                web_sys::console::warn_1(&format!("Logout: {}", e).into());
            }
            state.sign_out();
            state.show_success("Logged out successfully");
        });
    };

    view! {
        <aside class="w-72 shrink-0 bg-gray-800 border-r border-gray-700 p-4 space-y-6">
            // Doctor profile
            {move || doctor.get().map(|doctor| view! { <ProfileCard doctor=doctor /> })}

            // System status
            <section>
                <h3 class="text-sm font-semibold text-gray-400 uppercase mb-2">"System Status"</h3>
                {move || match system.get() {
                    Some(system) => view! { <StatusPanel system=system /> }.into_view(),
                    None => view! {
                        <span class="text-sm text-gray-500">"Checking backend..."</span>
                    }.into_view(),
                }}
            </section>

            // Quick actions
            <section class="space-y-2">
                <h3 class="text-sm font-semibold text-gray-400 uppercase mb-2">"Quick Actions"</h3>
                <button
                    on:click=emergency
                    class="w-full px-4 py-2 bg-red-700 hover:bg-red-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "🚨 Emergency Alert"
                </button>
                <button
                    on:click=settings
                    class="w-full px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "⚙️ Settings"
                </button>
                <button
                    on:click=logout
                    class="w-full px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "🚪 Logout"
                </button>
            </section>
        </aside>
    }
}

#[component]
fn ProfileCard(doctor: DoctorProfile) -> impl IntoView {
    view! {
        <section class="space-y-1">
            <div class="text-3xl">"👨‍⚕️"</div>
            <div class="font-bold text-lg">{doctor.name}</div>
            <div class="text-sm text-primary-400">{doctor.specialization}</div>
            <div class="text-xs text-gray-400">{doctor.hospital}</div>
            <div class="text-xs text-gray-500">
                {format!("License: {} · {}", doctor.license, doctor.experience)}
            </div>
            <div class="text-xs text-gray-500">{doctor.email}</div>
        </section>
    }
}

#[component]
fn StatusPanel(system: SystemStatus) -> impl IntoView {
    let color = if system.connected { "text-green-400" } else { "text-red-400" };
    let counts = system.collections.clone().unwrap_or_default();

    view! {
        <div class="space-y-1 text-sm">
            <div class=color>{system.label.clone()}</div>
            {system.connected.then(|| view! {
                <div class="text-gray-400">{format!("Database: {}", system.database)}</div>
                <CollectionLines counts=counts />
            })}
            {system.error.map(|e| view! { <div class="text-xs text-gray-500">{e}</div> })}
        </div>
    }
}

#[component]
fn CollectionLines(counts: CollectionCounts) -> impl IntoView {
    let line = |label: &str, count: Option<u64>| {
        format!(
            "{}: {}",
            label,
            count.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
        )
    };

    view! {
        <ul class="text-xs text-gray-500">
            <li>{line("Users", counts.users)}</li>
            <li>{line("Appointments", counts.appointments)}</li>
            <li>{line("Medicines", counts.medicines)}</li>
        </ul>
    }
}
