//! Top Bar
//!
//! Brand, one link per portal page, and the signed-in doctor.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// (path, label) for each page in the portal
const PAGES: [(&str, &str); 4] = [
    ("/", "📊 Dashboard"),
    ("/appointments", "📅 Appointments"),
    ("/medicines", "💊 Medicines"),
    ("/prescriptions", "📝 Prescriptions"),
];

#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let doctor_name = move || state.doctor.with(|d| d.as_ref().map(|d| d.name.clone()).unwrap_or_default());

    view! {
        <nav class="bg-gray-800 border-b border-gray-700 px-4">
            <div class="flex items-center justify-between h-16">
                <A href="/" class="flex items-center space-x-3">
                    <span class="text-2xl">"🏥"</span>
                    <span class="text-xl font-bold text-white">"Mediculture"</span>
                    <span class="text-sm text-gray-400">"Doctor Portal"</span>
                </A>

                <div class="flex items-center space-x-1">
                    {PAGES
                        .into_iter()
                        .map(|(href, label)| view! { <PageLink href=href label=label /> })
                        .collect_view()}
                </div>

                <span class="text-sm text-gray-300">{doctor_name}</span>
            </div>
        </nav>
    }
}

#[component]
fn PageLink(href: &'static str, label: &'static str) -> impl IntoView {
    // `exact` keeps "/" from matching every page
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
