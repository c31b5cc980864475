//! Single post page with its approved comments and a comment form.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::spinner::Spinner;
use crate::net::types::{CommentRow, Post};
use crate::state::notices::NoticeState;

/// Post detail page, loaded by slug.
#[component]
pub fn PostDetailPage() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.get().get("slug").unwrap_or_default();

    let post = LocalResource::new(move || {
        let slug = slug();
        async move { crate::net::rest::fetch_post_by_slug(&slug).await }
    });

    view! {
        <div class="post-page">
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    post.get()
                        .map(|found| match found {
                            Some(post) => view! { <PostBody post=post/> }.into_any(),
                            None => view! { <p>"Post not found."</p> }.into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}

/// Rendered post plus its comment thread.
#[component]
fn PostBody(post: Post) -> impl IntoView {
    let post_id = post.id.clone();
    let content = post.content.clone().unwrap_or_default();

    let comments = LocalResource::new(move || {
        let post_id = post_id.clone();
        async move {
            crate::net::rest::fetch_approved_comments(&post_id)
                .await
                .unwrap_or_default()
        }
    });

    view! {
        <article class="post">
            {post.featured_image.clone().map(|src| view! {
                <img class="post__image" src=src alt=""/>
            })}
            <h1 class="post__title">{post.title.clone()}</h1>
            <p class="post__date">{post.created_at.clone().unwrap_or_default()}</p>
            // Post bodies are trusted HTML authored in the admin editor.
            <div class="post__content" inner_html=content></div>
        </article>

        <section class="comments">
            <h2>"Comments"</h2>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    comments
                        .get()
                        .map(|list| {
                            if list.is_empty() {
                                view! { <p>"No comments yet."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="comments__list">
                                        {list
                                            .clone()
                                            .into_iter()
                                            .map(comment_item)
                                            .collect::<Vec<_>>()}
                                    </ul>
                                }
                                .into_any()
                            }
                        })
                }}
            </Suspense>
            <CommentForm post_id=post.id.clone() comments=comments/>
        </section>
    }
}

fn comment_item(comment: CommentRow) -> impl IntoView {
    let author = comment
        .author_name
        .unwrap_or_else(|| "Anonymous".to_owned());
    view! {
        <li class="comments__item">
            <span class="comments__author">{author}</span>
            <p class="comments__body">{comment.content}</p>
        </li>
    }
}

/// New-comment form; submissions enter moderation as pending.
#[component]
fn CommentForm(post_id: String, comments: LocalResource<Vec<CommentRow>>) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let author = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());

    let submit = move |_| {
        let text = body.get();
        if text.trim().is_empty() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let post_id = post_id.clone();
            let name = author.get();
            leptos::task::spawn_local(async move {
                match crate::net::rest::submit_comment(&post_id, name.trim(), text.trim()).await {
                    Ok(()) => {
                        notices.update(|n| {
                            n.push_info("Comment submitted for review.");
                        });
                        body.set(String::new());
                        comments.refetch();
                    }
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&post_id, &comments, notices, text);
        }
    };

    view! {
        <div class="comment-form">
            <input
                type="text"
                placeholder="Your name"
                prop:value=move || author.get()
                on:input=move |ev| author.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Write a comment"
                prop:value=move || body.get()
                on:input=move |ev| body.set(event_target_value(&ev))
            ></textarea>
            <button class="btn" on:click=submit>
                "Post comment"
            </button>
        </div>
    }
}
