//! Metric Card Component
//!
//! A headline number with its label.

use leptos::*;

/// Metric card component
#[component]
pub fn MetricCard(
    /// Label above the value
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<String>,
    /// Emoji shown beside the label
    #[prop(optional)]
    icon: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-gray-600 transition">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{label}</span>
                {icon.map(|i| view! { <span class="text-xl">{i}</span> })}
            </div>

            <div class="text-3xl font-bold mt-2">
                {move || value.get()}
            </div>
        </div>
    }
}
