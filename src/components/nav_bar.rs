//! Top navigation bar with auth-aware links and a dark mode toggle.

use leptos::prelude::*;

use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::notices::NoticeState;
use crate::util::dark_mode;

/// Site header. Shows sign-in when signed out, profile/sign-out when
/// signed in, and the admin link only for admins.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let dark = RwSignal::new(dark_mode::read_preference());

    // Apply the stored theme once the header hydrates.
    Effect::new(move || {
        dark_mode::apply(dark.get_untracked());
    });

    let is_admin = move || auth.get().has_role(&[Role::Admin]);
    let display_name = move || {
        auth.get()
            .identity
            .map(|i| i.full_name.or(i.email).unwrap_or_else(|| "Account".to_owned()))
            .unwrap_or_default()
    };

    let on_toggle_dark = move |_| {
        dark.set(dark_mode::toggle(dark.get()));
    };

    let store = expect_context::<StoredValue<crate::app::StoreHandle, LocalStorage>>();
    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                if let Err(err) = store.sign_out().await {
                    notices.update(|n| {
                        n.push_error(err.to_string());
                    });
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, notices);
        }
    };

    view! {
        <header class="nav-bar">
            <a class="nav-bar__brand" href="/">
                "Inkpress"
            </a>
            <nav class="nav-bar__links">
                <a href="/search">"Search"</a>
                <Show when=is_admin>
                    <a href="/admin">"Admin"</a>
                </Show>
                <Show
                    when=move || auth.get().is_authenticated()
                    fallback=|| view! { <a class="nav-bar__signin" href="/auth/login">"Sign in"</a> }
                >
                    <a href="/user/profile">{display_name}</a>
                    <button class="nav-bar__signout" on:click=on_sign_out>
                        "Sign out"
                    </button>
                </Show>
                <button class="nav-bar__dark" on:click=on_toggle_dark title="Toggle dark mode">
                    {move || if dark.get() { "Light" } else { "Dark" }}
                </button>
            </nav>
        </header>
    }
}
