//! Home page listing published posts.

use leptos::prelude::*;

use crate::components::post_card::PostCard;
use crate::components::spinner::Spinner;

/// Front page: newest published posts as cards.
#[component]
pub fn HomePage() -> impl IntoView {
    let posts = LocalResource::new(|| crate::net::rest::fetch_published_posts());

    view! {
        <div class="home-page">
            <h1>"Latest posts"</h1>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    posts
                        .get()
                        .map(|list| match list {
                            Some(list) if !list.is_empty() => view! {
                                <div class="home-page__grid">
                                    {list
                                        .into_iter()
                                        .map(|post| view! { <PostCard post=post/> })
                                        .collect::<Vec<_>>()}
                                </div>
                            }
                            .into_any(),
                            _ => view! { <p class="home-page__empty">"Nothing published yet."</p> }
                                .into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}
