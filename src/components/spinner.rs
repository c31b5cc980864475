use leptos::prelude::*;

/// Small loading indicator used by suspense fallbacks and the guards.
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <span class="spinner" aria-label="Loading">
            <span class="spinner__ring"></span>
        </span>
    }
}
