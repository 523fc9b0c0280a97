//! Medicines Page
//!
//! Catalog search with category filter.

use leptos::*;

use crate::api::{self, MedicineCard, MedicinesView};
use crate::components::ListSkeleton;
use crate::state::global::GlobalState;

/// Medicines page component
#[component]
pub fn Medicines() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (search, set_search) = create_signal(String::new());
    let (category, set_category) = create_signal("All".to_string());
    let medicines = create_rw_signal(None::<MedicinesView>);

    let load = move |searched: bool| {
        let state = state.clone();
        let search = search.get_untracked();
        let category = category.get_untracked();
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_medicines(&search, &category, searched).await {
                Ok(view) => {
                    state.show_notices(&view.notices);
                    medicines.set(Some(view));
                }
                Err(e) => state.show_error(&e),
            }
            state.loading.set(false);
        });
    };

    // Initial browse
    let load_initial = load.clone();
    create_effect(move |_| load_initial(false));

    let load_on_click = load.clone();
    let on_search = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        load_on_click(true);
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Medicine Catalog"</h1>
                <p class="text-gray-400 mt-1">"Search medicines by name or category"</p>
            </div>

            // Search bar
            <form on:submit=on_search class="flex flex-wrap gap-4 items-end">
                <div class="flex-1 min-w-[240px]">
                    <label class="block text-sm text-gray-400 mb-2">"Search"</label>
                    <input
                        type="text"
                        placeholder="Medicine name, generic name..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    // Options come from the server, "All" first
                    <label class="block text-sm text-gray-400 mb-2">"Category"</label>
                    <select
                        on:change=move |ev| set_category.set(event_target_value(&ev))
                        class="bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-primary-500 focus:outline-none"
                    >
                        {move || {
                            medicines
                                .with(|v| v.as_ref().map(|v| v.categories.clone()))
                                .unwrap_or_default()
                                .into_iter()
                                .map(|c| {
                                    let selected = c == category.get_untracked();
                                    view! { <option value=c.clone() selected=selected>{c.clone()}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>
                <button
                    type="submit"
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "🔍 Search"
                </button>
            </form>

            // Results
            {move || match medicines.get() {
                None => view! { <ListSkeleton count=6 /> }.into_view(),
                Some(view) => view! {
                    <div class="space-y-4">
                        <div>
                            <p class="text-gray-300 font-medium">{view.heading}</p>
                            {view.showing.map(|s| view! { <p class="text-sm text-gray-400">{s}</p> })}
                        </div>

                        {match view.empty_message {
                            Some(empty) => view! {
                                <div class="bg-gray-800 rounded-xl p-8 text-center text-gray-400">{empty}</div>
                            }.into_view(),
                            None => view! {
                                <div class="grid md:grid-cols-2 xl:grid-cols-3 gap-4">
                                    {view.medicines.into_iter()
                                        .map(|card| view! { <MedicineItem card=card /> })
                                        .collect_view()}
                                </div>
                            }.into_view(),
                        }}
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn MedicineItem(card: MedicineCard) -> impl IntoView {
    let stock_class = if card.in_stock { "text-green-400" } else { "text-red-400" };
    let rx_class = if card.prescription_required { "text-yellow-400" } else { "text-blue-400" };

    view! {
        <div class="bg-gray-800 rounded-xl p-5 border border-gray-700 space-y-3">
            <div>
                <h3 class="text-lg font-semibold">{card.name}</h3>
                <p class="text-sm text-gray-400">{card.generic_name}</p>
            </div>

            <div class="text-sm space-y-1">
                <div><span class="text-gray-400">"Category: "</span>{card.category}</div>
                <div><span class="text-gray-400">"Manufacturer: "</span>{card.manufacturer}</div>
                <div><span class="text-gray-400">"Dosage: "</span>{card.dosage}</div>
                <div><span class="text-gray-400">"Packaging: "</span>{card.packaging}</div>
            </div>

            // Price
            <div class="flex items-baseline space-x-2">
                <span class="text-xl font-bold">{card.price.price}</span>
                {card.price.original_price.map(|p| view! {
                    <span class="text-sm text-gray-500 line-through">{p}</span>
                })}
                {card.price.discount.map(|d| view! {
                    <span class="text-sm text-green-400 font-medium">{d}</span>
                })}
            </div>

            <div class="flex justify-between text-sm">
                <span class=stock_class>{card.stock_label}</span>
                <span class=rx_class>{card.prescription_label}</span>
            </div>

            {card.rating.map(|r| view! {
                <div class="text-sm">
                    <span class="text-yellow-400">{r.stars}</span>
                    " "
                    <span class="text-gray-400">{r.label}</span>
                </div>
            })}

            {card.description.map(|d| view! {
                <details class="text-sm">
                    <summary class="cursor-pointer text-gray-400">"Description"</summary>
                    <p class="mt-2 text-gray-300">{d}</p>
                </details>
            })}
        </div>
    }
}
