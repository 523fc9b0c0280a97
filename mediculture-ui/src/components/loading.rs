//! Placeholders shown while portal data is in flight.

use leptos::*;

/// Centered spinner with an optional caption, e.g. "Restoring session..."
#[component]
pub fn Loading(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            {label.map(|text| view! { <span class="text-sm text-gray-400">{text}</span> })}
        </div>
    }
}

/// Small spinner for buttons that are submitting
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! { <span class="inline-block loading-spinner w-4 h-4" /> }
}

/// Grey bars standing in for appointment or medicine cards
#[component]
pub fn ListSkeleton(#[prop(default = 3)] count: usize) -> impl IntoView {
    let rows = (0..count)
        .map(|_| view! { <div class="bg-gray-700 rounded-xl h-24" /> })
        .collect_view();

    view! { <div class="space-y-3 animate-pulse">{rows}</div> }
}
