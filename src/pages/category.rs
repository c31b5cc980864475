//! Category page listing published posts under one category.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::post_card::PostCard;
use crate::components::spinner::Spinner;
use crate::net::types::{Category, Post};

/// Posts filed under the category named by the `:slug` param.
#[component]
pub fn CategoryPage() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.get().get("slug").unwrap_or_default();

    // Category lookup and post list resolve together.
    let listing = LocalResource::new(move || {
        let slug = slug();
        async move {
            let category = crate::net::rest::fetch_category_by_slug(&slug).await?;
            let posts = crate::net::rest::fetch_posts_by_category(&category.id)
                .await
                .unwrap_or_default();
            Some((category, posts))
        }
    });

    view! {
        <div class="category-page">
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    listing
                        .get()
                        .map(|found: Option<(Category, Vec<Post>)>| match found {
                            Some((category, posts)) => view! {
                                <h1>{category.name}</h1>
                                <div class="category-page__grid">
                                    {posts
                                        .into_iter()
                                        .map(|post| view! { <PostCard post=post/> })
                                        .collect::<Vec<_>>()}
                                </div>
                            }
                            .into_any(),
                            None => view! { <p>"Category not found."</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}
