//! Account registration page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::notices::NoticeState;

/// Registration form. On success the new account gets a `profiles` row
/// with the default `user` role; a failed profile write surfaces as an
/// overall failure.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let store = expect_context::<StoredValue<crate::app::StoreHandle, LocalStorage>>();
    let navigate = use_navigate();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = move || {
        let full_name = full_name.get();
        let email = email.get();
        let password = password.get();
        if full_name.trim().is_empty() || email.trim().is_empty() || busy.get() {
            return;
        }
        if password.len() < 8 {
            notices.update(|n| {
                n.push_error("Password must be at least 8 characters");
            });
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            let store = store.get_value();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = store
                    .sign_up(email.trim(), &password, full_name.trim())
                    .await;
                busy.set(false);
                match result {
                    Ok(_) => {
                        notices.update(|n| {
                            n.push_info("Account created. You can sign in now.");
                        });
                        navigate("/auth/login", NavigateOptions::default());
                    }
                    Err(err) => notices.update(|n| {
                        n.push_error(err.to_string());
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, &navigate, full_name, email, password);
        }
    };

    view! {
        <div class="auth-page">
            <h1>"Create an account"</h1>
            <label class="auth-page__label">
                "Full name"
                <input
                    type="text"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
            </label>
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
                />
            </label>
            <button
                class="btn btn--primary"
                disabled=move || busy.get()
                on:click=move |_| submit()
            >
                {move || if busy.get() { "Creating..." } else { "Create account" }}
            </button>
            <p class="auth-page__links">
                <a href="/auth/login">"Already have an account? Sign in"</a>
            </p>
        </div>
    }
}
