//! Sign-in page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::notices::NoticeState;

/// Email/password sign-in form. Already-signed-in visitors are sent home.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let store = expect_context::<StoredValue<crate::app::StoreHandle, LocalStorage>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // No reason to show the form to a signed-in user.
    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let state = auth.get();
            if !state.loading && state.is_authenticated() {
                navigate("/", NavigateOptions::default());
            }
        });
    }

    let submit = move || {
        let email = email.get();
        let password = password.get();
        if email.trim().is_empty() || password.is_empty() || busy.get() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                let result = store.sign_in(email.trim(), &password).await;
                busy.set(false);
                if let Err(err) = result {
                    notices.update(|n| {
                        n.push_error(err.to_string());
                    });
                }
                // On success the session push lands and the effect above
                // navigates home.
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, notices, email, password);
        }
    };

    let submit_on_key = submit.clone();

    view! {
        <div class="auth-page">
            <h1>"Sign in"</h1>
            <label class="auth-page__label">
                "Email"
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label class="auth-page__label">
                "Password"
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit_on_key();
                        }
                    }
                />
            </label>
            <button
                class="btn btn--primary"
                disabled=move || busy.get()
                on:click=move |_| submit()
            >
                {move || if busy.get() { "Signing in..." } else { "Sign in" }}
            </button>
            <p class="auth-page__links">
                <a href="/auth/forgot-password">"Forgot password?"</a>
                <a href="/auth/register">"Create an account"</a>
            </p>
        </div>
    }
}
