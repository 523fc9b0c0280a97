//! Prescriptions Page
//!
//! Create-prescription form and past prescription history.

use leptos::*;

use crate::api::{self, MedicineRow, PrescriptionEntry, PrescriptionForm, PrescriptionHistory};
use crate::components::loading::InlineLoading;
use crate::components::ListSkeleton;
use crate::state::global::GlobalState;

const CONSULTATION_TYPES: [&str; 4] = ["consultation", "checkup", "follow-up", "emergency"];
const MAX_MEDICINE_ROWS: usize = 10;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Create,
    History,
}

/// Prescriptions page component
#[component]
pub fn Prescriptions() -> impl IntoView {
    let (tab, set_tab) = create_signal(Tab::Create);

    let tab_button = move |target: Tab, label: &'static str| {
        view! {
            <button
                on:click=move |_| set_tab.set(target)
                class=move || {
                    let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                    if tab.get() == target {
                        format!("{} bg-primary-600 text-white", base)
                    } else {
                        format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                    }
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Prescriptions"</h1>
                <p class="text-gray-400 mt-1">"Write new prescriptions and review past ones"</p>
            </div>

            <div class="flex space-x-2">
                {tab_button(Tab::Create, "📝 Create Prescription")}
                {tab_button(Tab::History, "📋 Prescription History")}
            </div>

            {move || match tab.get() {
                Tab::Create => view! { <CreatePrescription /> }.into_view(),
                Tab::History => view! { <History /> }.into_view(),
            }}
        </div>
    }
}

/// Non-blank trimmed lines of the symptoms box
fn symptom_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Rows the server will keep: those with a medicine name
fn filled_rows(rows: &[MedicineRow]) -> Vec<MedicineRow> {
    rows.iter()
        .filter(|r| !r.name.trim().is_empty())
        .cloned()
        .collect()
}

#[component]
fn CreatePrescription() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let doctor = state.doctor.get_untracked().unwrap_or_default();
    let now = chrono::Local::now();

    let (patient_id, set_patient_id) = create_signal(String::new());
    let (doctor_name, set_doctor_name) = create_signal(doctor.name);
    let (specialty, set_specialty) = create_signal(doctor.specialization);
    let (date, set_date) = create_signal(now.format("%Y-%m-%d").to_string());
    let (time, set_time) = create_signal(now.format("%H:%M").to_string());
    let (kind, set_kind) = create_signal(CONSULTATION_TYPES[0].to_string());
    let (symptoms, set_symptoms) = create_signal(String::new());
    let (notes, set_notes) = create_signal(String::new());
    let rows = create_rw_signal(vec![MedicineRow::default()]);
    // Row inputs re-render only when a row is added or removed
    let row_count = create_memo(move |_| rows.with(Vec::len));
    let (submitting, set_submitting) = create_signal(false);
    let created = create_rw_signal(None::<serde_json::Value>);

    let add_row = move |_| {
        rows.update(|r| {
            if r.len() < MAX_MEDICINE_ROWS {
                r.push(MedicineRow::default());
            }
        })
    };
    let remove_row = move |_| {
        rows.update(|r| {
            if r.len() > 1 {
                r.pop();
            }
        })
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        if patient_id.get().trim().is_empty() || doctor_name.get().trim().is_empty() {
            state.show_error("Please fill in Patient ID and Doctor Name");
            return;
        }

        let form = PrescriptionForm {
            patient_id: patient_id.get().trim().to_string(),
            doctor_name: Some(doctor_name.get()),
            specialty: Some(specialty.get()),
            date: date.get(),
            time: time.get(),
            consultation_type: kind.get(),
            symptoms: symptom_lines(&symptoms.get()).join("\n"),
            medicines: filled_rows(&rows.get()),
            notes: notes.get(),
        };

        set_submitting.set(true);
        let state = state.clone();
        spawn_local(async move {
            match api::create_prescription(&form).await {
                Ok(response) => {
                    state.show_success(&response.message);
                    created.set(Some(response.appointment));
                }
                Err(e) => state.show_error(&format!("Error creating prescription: {}", e)),
            }
            set_submitting.set(false);
        });
    };

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-3 \
                       border border-gray-600 focus:border-primary-500 focus:outline-none";

    view! {
        <div class="space-y-6">
            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-6">
                <div class="grid md:grid-cols-2 gap-4">
                    <TextField label="Patient ID (Firebase UID)" value=patient_id set=set_patient_id class=input_class />
                    <TextField label="Doctor Name" value=doctor_name set=set_doctor_name class=input_class />
                    <TextField label="Specialty" value=specialty set=set_specialty class=input_class />
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Consultation Type"</label>
                        <select
                            on:change=move |ev| set_kind.set(event_target_value(&ev))
                            class=input_class
                        >
                            {CONSULTATION_TYPES.into_iter().map(|t| view! {
                                <option value=t selected=move || kind.get() == t>{t}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Date"</label>
                        <input
                            type="date"
                            prop:value=move || date.get()
                            on:input=move |ev| set_date.set(event_target_value(&ev))
                            class=input_class
                        />
                    </div>
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Time"</label>
                        <input
                            type="time"
                            prop:value=move || time.get()
                            on:input=move |ev| set_time.set(event_target_value(&ev))
                            class=input_class
                        />
                    </div>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Symptoms (one per line)"</label>
                    <textarea
                        rows="3"
                        prop:value=move || symptoms.get()
                        on:input=move |ev| set_symptoms.set(event_target_value(&ev))
                        class=input_class
                    />
                </div>

                // Medicine rows
                <div class="space-y-3">
                    <div class="flex items-center justify-between">
                        <h3 class="font-semibold">"Medicines"</h3>
                        <div class="flex space-x-2">
                            <button
                                type="button"
                                on:click=remove_row
                                disabled=move || row_count.get() <= 1
                                class="px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:opacity-50 rounded text-sm"
                            >
                                "−"
                            </button>
                            <span class="text-sm text-gray-400">
                                {move || format!("{} / {}", row_count.get(), MAX_MEDICINE_ROWS)}
                            </span>
                            <button
                                type="button"
                                on:click=add_row
                                disabled=move || row_count.get() >= MAX_MEDICINE_ROWS
                                class="px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:opacity-50 rounded text-sm"
                            >
                                "+"
                            </button>
                        </div>
                    </div>

                    {move || (0..row_count.get()).map(|idx| view! {
                        <MedicineRowInputs rows=rows idx=idx class=input_class />
                    }).collect_view()}
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Notes / Instructions"</label>
                    <textarea
                        rows="3"
                        prop:value=move || notes.get()
                        on:input=move |ev| set_notes.set(event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors flex items-center space-x-2"
                >
                    {move || submitting.get().then(|| view! { <InlineLoading /> })}
                    <span>"💾 Create Prescription"</span>
                </button>
            </form>

            {move || created.get().map(|record| {
                let pretty = serde_json::to_string_pretty(&record).unwrap_or_default();
                view! {
                    <section class="bg-gray-800 rounded-xl p-6">
                        <h3 class="font-semibold mb-2">"Created Record"</h3>
                        <pre class="text-xs bg-gray-900 rounded p-3 overflow-x-auto">{pretty}</pre>
                    </section>
                }
            })}
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    value: ReadSignal<String>,
    set: WriteSignal<String>,
    class: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type="text"
                prop:value=move || value.get()
                on:input=move |ev| set.set(event_target_value(&ev))
                class=class
            />
        </div>
    }
}

/// Name, dosage, frequency and duration inputs for one row
#[component]
fn MedicineRowInputs(
    rows: RwSignal<Vec<MedicineRow>>,
    idx: usize,
    class: &'static str,
) -> impl IntoView {
    let field = move |placeholder: &'static str,
                      get: fn(&MedicineRow) -> &String,
                      set: fn(&mut MedicineRow, String)| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || {
                    rows.with(|r| r.get(idx).map(|row| get(row).clone()))
                        .unwrap_or_default()
                }
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    rows.update(|r| {
                        if let Some(row) = r.get_mut(idx) {
                            set(row, text);
                        }
                    });
                }
                class=class
            />
        }
    };

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-2">
            {field("Medicine name", |r| &r.name, |r, v| r.name = v)}
            {field("Dosage (e.g. 500mg)", |r| &r.dosage, |r, v| r.dosage = v)}
            {field("Frequency (e.g. twice daily)", |r| &r.frequency, |r, v| r.frequency = v)}
            {field("Duration (e.g. 5 days)", |r| &r.duration, |r, v| r.duration = v)}
        </div>
    }
}

#[component]
fn History() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let history = create_rw_signal(None::<PrescriptionHistory>);

    create_effect(move |_| {
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_prescriptions().await {
                Ok(view) => {
                    state.show_notices(&view.notices);
                    history.set(Some(view));
                }
                Err(e) => state.show_error(&e),
            }
        });
    });

    view! {
        {move || match history.get() {
            None => view! { <ListSkeleton count=3 /> }.into_view(),
            Some(view) if view.prescriptions.is_empty() => view! {
                <div class="bg-gray-800 rounded-xl p-8 text-center text-gray-400">
                    {view.empty_message.unwrap_or_default()}
                </div>
            }.into_view(),
            Some(view) => view! {
                <div class="space-y-4">
                    {view.prescriptions.into_iter()
                        .map(|entry| view! { <HistoryEntry entry=entry /> })
                        .collect_view()}
                </div>
            }.into_view(),
        }}
    }
}

#[component]
fn HistoryEntry(entry: PrescriptionEntry) -> impl IntoView {
    view! {
        <details class="bg-gray-800 rounded-xl border border-gray-700">
            <summary class="cursor-pointer px-6 py-4 font-semibold">{entry.title}</summary>
            <div class="px-6 pb-6 space-y-3 text-sm">
                <div class="grid md:grid-cols-2 gap-2">
                    <div><span class="text-gray-400">"Patient: "</span>{entry.patient}</div>
                    <div><span class="text-gray-400">"Doctor: "</span>{entry.doctor}</div>
                    <div><span class="text-gray-400">"Date: "</span>{entry.date}</div>
                    <div><span class="text-gray-400">"Type: "</span>{entry.kind}</div>
                </div>
                {entry.symptoms.map(|s| view! {
                    <div><span class="text-gray-400">"Symptoms: "</span>{s}</div>
                })}
                <div>
                    <h4 class="text-gray-400 mb-1">"Medicines:"</h4>
                    <ul class="space-y-1">
                        {entry.medicines.into_iter().map(|m| view! {
                            <li class="bg-gray-700 rounded px-3 py-2">
                                <span class="font-medium">{m.name}</span>
                                {format!(" · {} · {} · {}", m.dosage, m.frequency, m.duration)}
                            </li>
                        }).collect_view()}
                    </ul>
                </div>
                {entry.notes.map(|n| view! {
                    <div><span class="text-gray-400">"Notes: "</span>{n}</div>
                })}
            </div>
        </details>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_lines_drop_blanks() {
        assert_eq!(
            symptom_lines("  Headache \n\n Fever\n   \n"),
            vec!["Headache", "Fever"]
        );
    }

    #[test]
    fn test_filled_rows_require_name() {
        let rows = vec![
            MedicineRow {
                name: "Paracetamol".to_string(),
                dosage: "500mg".to_string(),
                ..Default::default()
            },
            MedicineRow {
                name: "  ".to_string(),
                dosage: "10mg".to_string(),
                ..Default::default()
            },
        ];

        let kept = filled_rows(&rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Paracetamol");
    }
}
