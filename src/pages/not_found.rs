//! Fallback page for unmatched routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found"</h1>
            <p>"The page you are looking for does not exist."</p>
            <a class="btn" href="/">
                "Back to the front page"
            </a>
        </div>
    }
}
