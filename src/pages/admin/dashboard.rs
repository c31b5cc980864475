//! Admin dashboard with content counts.

use leptos::prelude::*;

use crate::components::spinner::Spinner;

/// Landing page of the admin area: headline counts and shortcuts.
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let counts = LocalResource::new(|| async {
        let posts = crate::net::rest::fetch_all_posts().await.unwrap_or_default();
        let categories = crate::net::rest::fetch_categories()
            .await
            .unwrap_or_default();
        let pending = crate::net::rest::fetch_comments_by_status("pending")
            .await
            .unwrap_or_default();
        (posts.len(), categories.len(), pending.len())
    });

    view! {
        <div class="admin-dashboard">
            <h1>"Dashboard"</h1>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    counts
                        .get()
                        .map(|(posts, categories, pending)| view! {
                            <div class="admin-dashboard__stats">
                                <a class="stat-card" href="/admin/posts">
                                    <span class="stat-card__value">{posts}</span>
                                    <span class="stat-card__label">"Posts"</span>
                                </a>
                                <a class="stat-card" href="/admin/categories">
                                    <span class="stat-card__value">{categories}</span>
                                    <span class="stat-card__label">"Categories"</span>
                                </a>
                                <a class="stat-card" href="/admin/comments">
                                    <span class="stat-card__value">{pending}</span>
                                    <span class="stat-card__label">"Pending comments"</span>
                                </a>
                            </div>
                        })
                }}
            </Suspense>
            <a class="btn btn--primary" href="/admin/posts/new">
                "Write a post"
            </a>
        </div>
    }
}
