//! Dashboard Page
//!
//! Headline counts, status and category charts, and recent appointments.

use leptos::*;

use crate::api::{self, DashboardView, RecentAppointment};
use crate::components::{BarChart, Loading, MetricCard, PieChart};
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let dashboard = create_rw_signal(None::<DashboardView>);

    // Fetch dashboard on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_dashboard().await {
                Ok(view) => {
                    state.show_notices(&view.notices);
                    dashboard.set(Some(view));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch dashboard: {}", e).into());
                    state.show_error(&e);
                }
            }

            state.loading.set(false);
        });
    });

    let metric = move |pick: fn(&DashboardView) -> String| {
        Signal::derive(move || {
            dashboard
                .with(|d| d.as_ref().map(pick))
                .unwrap_or_else(|| "—".to_string())
        })
    };

    let status_data = Signal::derive(move || {
        dashboard.with(|d| d.as_ref().map(|d| d.status_distribution.clone()).unwrap_or_default())
    });
    let category_data = Signal::derive(move || {
        dashboard.with(|d| d.as_ref().map(|d| d.category_distribution.clone()).unwrap_or_default())
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">
                    {move || dashboard.with(|d| {
                        d.as_ref().map(|d| d.greeting.clone()).unwrap_or_default()
                    })}
                </p>
            </div>

            // Headline metrics
            <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <MetricCard
                    label="Scheduled Appointments"
                    icon="📅"
                    value=metric(|d| d.metrics.scheduled_appointments.to_string())
                />
                <MetricCard
                    label="Completed Consultations"
                    icon="✅"
                    value=metric(|d| d.metrics.completed_consultations.to_string())
                />
                <MetricCard
                    label="Available Medicines"
                    icon="💊"
                    value=metric(|d| d.metrics.available_medicines.to_string())
                />
                <MetricCard
                    label="Registered Users"
                    icon="👥"
                    value=metric(|d| d.metrics.registered_users.to_string())
                />
            </section>

            {move || {
                if state.loading.get() && dashboard.with(Option::is_none) {
                    return view! { <Loading label="Loading dashboard..." /> }.into_view();
                }

                view! {
                    // Charts
                    <div class="grid md:grid-cols-2 gap-8">
                        <section class="bg-gray-800 rounded-xl p-6">
                            <h2 class="text-xl font-semibold mb-4">"Appointment Status Distribution"</h2>
                            {move || if status_data.with(Vec::is_empty) {
                                view! {
                                    <p class="text-gray-400">"No appointment data available"</p>
                                }.into_view()
                            } else {
                                view! { <PieChart data=status_data /> }.into_view()
                            }}
                        </section>

                        {move || (!category_data.with(Vec::is_empty)).then(|| view! {
                            <section class="bg-gray-800 rounded-xl p-6">
                                <h2 class="text-xl font-semibold mb-4">"Medicine Categories"</h2>
                                <BarChart data=category_data />
                            </section>
                        })}
                    </div>

                    <RecentAppointments dashboard=dashboard />
                }.into_view()
            }}
        </div>
    }
}

/// Most recent appointments, or the backend health record when there are none
#[component]
fn RecentAppointments(dashboard: RwSignal<Option<DashboardView>>) -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Recent Appointments"</h2>

            {move || {
                let Some(view) = dashboard.get() else {
                    return view! {}.into_view();
                };

                if view.recent_appointments.is_empty() {
                    let health = view
                        .backend_health
                        .and_then(|h| serde_json::to_string_pretty(&h).ok())
                        .unwrap_or_default();

                    return view! {
                        <div class="space-y-3">
                            <p class="text-gray-400">"No appointments found"</p>
                            {(!health.is_empty()).then(|| view! {
                                <div>
                                    <h3 class="text-sm text-gray-400 mb-1">"Backend Health"</h3>
                                    <pre class="text-xs bg-gray-900 rounded p-3 overflow-x-auto">{health}</pre>
                                </div>
                            })}
                        </div>
                    }.into_view();
                }

                view! {
                    <div class="space-y-2">
                        {view.recent_appointments.into_iter()
                            .map(|row| view! { <RecentRow row=row /> })
                            .collect_view()}
                    </div>
                }.into_view()
            }}
        </section>
    }
}

#[component]
fn RecentRow(row: RecentAppointment) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between bg-gray-700 rounded-lg px-4 py-3">
            <div class="flex items-center space-x-3">
                <span>{row.indicator}</span>
                <span class="font-medium">{format!("Patient: {}", row.patient)}</span>
            </div>
            <div class="flex items-center space-x-4 text-sm text-gray-400">
                <span>{row.date}</span>
                <span class="uppercase">{row.status}</span>
            </div>
        </div>
    }
}
