//! Portal Root
//!
//! Everything behind the login gate is routed inside `Portal`.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Loading, Nav, Sidebar, Toast};
use crate::pages::{Appointments, Dashboard, Login, Medicines, Prescriptions};
use crate::state::global::{provide_global_state, GlobalState};

#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Resume a saved session if the server still knows it
    let (restoring, set_restoring) = create_signal(api::stored_session().is_some());
    let state_for_restore = state.clone();
    create_effect(move |_| {
        if api::stored_session().is_none() {
            return;
        }
        let state = state_for_restore.clone();
        spawn_local(async move {
            match api::fetch_session().await {
                Ok(doctor) => state.doctor.set(Some(doctor)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Saved session rejected: {}", e).into());
                    api::clear_session();
                }
            }
            set_restoring.set(false);
        });
    });

    view! {
        <Router>
            {move || {
                if restoring.get() {
                    view! { <Loading label="Restoring session..." /> }.into_view()
                } else if state.is_logged_in() {
                    view! { <Portal /> }.into_view()
                } else {
                    view! { <Login /> }.into_view()
                }
            }}

            <Toast />
        </Router>
    }
}

/// Logged-in layout: nav, sidebar and the routed page
#[component]
fn Portal() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Nav />

            <div class="flex flex-1">
                <Sidebar />

                <main class="flex-1 px-6 py-8">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/appointments" view=Appointments />
                        <Route path="/medicines" view=Medicines />
                        <Route path="/prescriptions" view=Prescriptions />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>
            </div>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🩺"</div>
            <h1 class="text-3xl font-bold mb-2">"No Such Page"</h1>
            <p class="text-gray-400 mb-6">"This portal has a dashboard, appointments, medicines and prescriptions."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Back to Dashboard"
            </A>
        </div>
    }
}
