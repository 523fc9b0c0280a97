//! Login Page
//!
//! Demo login. Any credentials are accepted once the backend is reachable.

use leptos::*;

use crate::api;
use crate::components::loading::InlineLoading;
use crate::state::global::GlobalState;

/// Login screen shown while there is no session
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        api::set_api_base(&api_url.get());

        let state = state.clone();
        let email = email.get();
        let password = password.get();
        spawn_local(async move {
            match api::login(&email, &password).await {
                Ok(response) => {
                    state.show_success(&response.message);
                    state.doctor.set(Some(response.doctor));
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-900 text-white">
            <form
                on:submit=on_submit
                class="bg-gray-800 rounded-xl p-8 w-full max-w-md space-y-5 border border-gray-700"
            >
                <div class="text-center">
                    <div class="text-5xl mb-2">"🏥"</div>
                    <h1 class="text-2xl font-bold">"Mediculture Doctor Portal"</h1>
                    <p class="text-gray-400 text-sm mt-1">"Sign in to manage your practice"</p>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                    <input
                        type="email"
                        placeholder="doctor@mediculture.com"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <details class="text-sm">
                    <summary class="text-gray-400 cursor-pointer">"Portal server"</summary>
                    <input
                        type="text"
                        prop:value=move || api_url.get()
                        on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        class="mt-2 w-full bg-gray-700 rounded-lg px-4 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </details>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors flex items-center justify-center space-x-2"
                >
                    {move || submitting.get().then(|| view! { <InlineLoading /> })}
                    <span>{move || if submitting.get() { "Signing in..." } else { "Login" }}</span>
                </button>

                <p class="text-xs text-gray-500 text-center">
                    "Demo mode: any email and password will sign you in."
                </p>
            </form>
        </div>
    }
}
