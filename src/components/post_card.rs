//! Reusable card component for post list items.

use leptos::prelude::*;

use crate::net::types::Post;

/// A clickable card summarizing a post in a list.
#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let href = format!("/posts/{}", post.slug);
    let excerpt = post.excerpt.clone().unwrap_or_default();

    view! {
        <a class="post-card" href=href>
            {post.featured_image.clone().map(|src| view! {
                <img class="post-card__image" src=src alt=""/>
            })}
            <span class="post-card__title">{post.title.clone()}</span>
            <span class="post-card__excerpt">{excerpt}</span>
            <span class="post-card__date">{post.created_at.clone().unwrap_or_default()}</span>
        </a>
    }
}
