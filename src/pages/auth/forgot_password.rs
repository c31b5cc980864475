//! Password reset request page.

use leptos::prelude::*;

use crate::state::notices::NoticeState;

/// Asks for an email address and dispatches a reset link to it.
#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let store = expect_context::<StoredValue<crate::app::StoreHandle, LocalStorage>>();

    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = move || {
        let email = email.get();
        if email.trim().is_empty() || busy.get() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                let result = store.request_password_reset(email.trim()).await;
                busy.set(false);
                match result {
                    Ok(()) => notices.update(|n| {
                        n.push_info("Reset email sent. Check your inbox.");
                    }),
                    Err(err) => notices.update(|n| {
                        n.push_error(err.to_string());
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, notices, email);
        }
    };

    view! {
        <div class="auth-page">
            <h1>"Reset password"</h1>
            <label class="auth-page__label">
                "Email"
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <button
                class="btn btn--primary"
                disabled=move || busy.get()
                on:click=move |_| submit()
            >
                {move || if busy.get() { "Sending..." } else { "Send reset email" }}
            </button>
            <p class="auth-page__links">
                <a href="/auth/login">"Back to sign in"</a>
            </p>
        </div>
    }
}
