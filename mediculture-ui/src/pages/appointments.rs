//! Appointments Page
//!
//! Status-filtered appointment list with complete/reschedule/cancel actions.

use leptos::*;

use crate::api::{self, AppointmentAction, AppointmentCard, AppointmentsView};
use crate::components::{ListSkeleton, MetricCard};
use crate::state::global::GlobalState;

const DEFAULT_FILTERS: [&str; 6] = [
    "All",
    "scheduled",
    "confirmed",
    "completed",
    "cancelled",
    "rescheduled",
];

/// Appointments page component
#[component]
pub fn Appointments() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (filter, set_filter) = create_signal("All".to_string());
    let (refresh, set_refresh) = create_signal(0u32);
    let appointments = create_rw_signal(None::<AppointmentsView>);

    // Re-fetch when the filter changes or after an action
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let selected = filter.get();
        refresh.track();

        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_appointments(&selected).await {
                Ok(view) => {
                    state.show_notices(&view.notices);
                    appointments.set(Some(view));
                }
                Err(e) => state.show_error(&e),
            }
            state.loading.set(false);
        });
    });

    let reload = Callback::new(move |_: ()| set_refresh.update(|n| *n += 1));

    let state_for_demo = state.clone();
    let add_demo = move |_| {
        let state = state_for_demo.clone();
        spawn_local(async move {
            match api::create_demo_appointment().await {
                Ok(created) => {
                    state.show_success(&created.message);
                    reload.call(());
                }
                Err(e) => state.show_error(&format!("Error creating appointment: {}", e)),
            }
        });
    };

    let count = Signal::derive(move || {
        appointments
            .with(|v| v.as_ref().map(|v| v.count.to_string()))
            .unwrap_or_else(|| "—".to_string())
    });

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Appointments"</h1>
                    <p class="text-gray-400 mt-1">"Manage your patient appointments"</p>
                </div>
                <button
                    on:click=move |_| reload.call(())
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "🔄 Refresh"
                </button>
            </div>

            // Filter and count
            <div class="flex items-end gap-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Filter by Status"</label>
                    <select
                        on:change=move |ev| set_filter.set(event_target_value(&ev))
                        class="bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-primary-500 focus:outline-none"
                    >
                        {move || {
                            let options = appointments
                                .with(|v| v.as_ref().map(|v| v.filter_options.clone()))
                                .unwrap_or_else(|| DEFAULT_FILTERS.iter().map(|s| s.to_string()).collect());
                            options.into_iter().map(|option| {
                                let selected = option == filter.get_untracked();
                                view! {
                                    <option value=option.clone() selected=selected>{option.clone()}</option>
                                }
                            }).collect_view()
                        }}
                    </select>
                </div>
                <div class="w-56">
                    <MetricCard label="Appointments" icon="📅" value=count />
                </div>
            </div>

            // List
            {move || match appointments.get() {
                None => view! { <ListSkeleton count=4 /> }.into_view(),
                Some(view) if view.appointments.is_empty() => view! {
                    <div class="bg-gray-800 rounded-xl p-8 text-center space-y-4">
                        <p class="text-gray-400">
                            {view.empty_message.unwrap_or_else(|| "No appointments found".to_string())}
                        </p>
                        {view.offer_demo.then(|| view! {
                            <button
                                on:click=add_demo.clone()
                                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                            >
                                "➕ Add Demo Appointment"
                            </button>
                        })}
                    </div>
                }.into_view(),
                Some(view) => view! {
                    <div class="space-y-4">
                        <p class="text-gray-300 font-medium">{view.heading}</p>
                        {view.appointments.into_iter()
                            .map(|card| view! { <AppointmentItem card=card on_change=reload /> })
                            .collect_view()}
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

/// One appointment card with its actions
#[component]
fn AppointmentItem(card: AppointmentCard, on_change: Callback<()>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (busy, set_busy) = create_signal(false);

    let id = card.id.clone();
    let run_action = move |action: AppointmentAction| {
        let Some(id) = id.clone() else {
            state.show_error("Appointment has no id");
            return;
        };

        set_busy.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::update_appointment_status(&id, action).await {
                Ok(updated) => {
                    state.show_success(&updated.message);
                    on_change.call(());
                }
                Err(e) => state.show_error(&format!("Error updating appointment: {}", e)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <details class="bg-gray-800 rounded-xl border border-gray-700">
            <summary class="cursor-pointer px-6 py-4 flex items-center justify-between">
                <span class="font-semibold">{card.title.clone()}</span>
                <span class="text-xs px-2 py-1 rounded bg-gray-700">{card.status_label.clone()}</span>
            </summary>

            <div class="px-6 pb-6 grid md:grid-cols-3 gap-4 text-sm">
                <div class="space-y-1">
                    <Field label="Doctor" value=card.doctor.clone() />
                    <Field label="Specialty" value=card.specialty.clone() />
                    <Field label="Date" value=card.date.clone() />
                    <Field label="Time" value=card.time.clone() />
                    <Field label="Type" value=card.kind.clone() />
                </div>
                <div class="space-y-1">
                    <Field label="User ID" value=card.patient_id.clone() />
                    <Field label="Status" value=card.status_label.clone() />
                    <Field label="Total Fee" value=card.fee.clone() />
                    <Field label="Created" value=card.created.clone() />
                </div>
                <div class="space-y-2">
                    {card.symptoms.clone().map(|s| view! { <Field label="Symptoms" value=s /> })}
                    {card.notes.clone().map(|n| view! { <Field label="Notes" value=n /> })}
                    {(!card.prescribed.is_empty()).then(|| view! {
                        <div>
                            <span class="text-gray-400">"Prescribed Medicines:"</span>
                            <ul class="list-disc list-inside">
                                {card.prescribed.iter().map(|m| view! { <li>{m.clone()}</li> }).collect_view()}
                            </ul>
                        </div>
                    })}
                </div>
            </div>

            {(!card.actions.is_empty()).then(|| view! {
                <div class="px-6 pb-6 flex space-x-2">
                    {card.actions.iter().copied().map(|action| {
                        let run_action = run_action.clone();
                        view! {
                            <button
                                on:click=move |_| run_action(action)
                                disabled=move || busy.get()
                                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 disabled:bg-gray-800 rounded-lg text-sm font-medium transition-colors"
                            >
                                {action.label()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            })}
        </details>
    }
}

#[component]
fn Field(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div>
            <span class="text-gray-400">{format!("{}: ", label)}</span>
            <span>{value}</span>
        </div>
    }
}
