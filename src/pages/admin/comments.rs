//! Comment moderation queue.

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::types::CommentRow;
use crate::state::notices::NoticeState;

/// Pending comments with approve, reject, and delete actions. Approved
/// comments become visible on the post page; rejected ones stay hidden.
#[component]
pub fn AdminCommentsPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    let pending = LocalResource::new(|| async {
        crate::net::rest::fetch_comments_by_status("pending")
            .await
            .unwrap_or_default()
    });

    let moderate = move |id: String, status: &'static str| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::rest::set_comment_status(&id, status).await {
                    Ok(()) => pending.refetch(),
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, status, notices, pending);
        }
    };

    let delete = move |id: String| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::rest::delete_comment(&id).await {
                    Ok(()) => pending.refetch(),
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, notices, pending);
        }
    };

    view! {
        <div class="admin-comments">
            <h1>"Comments"</h1>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    pending
                        .get()
                        .map(|list: Vec<CommentRow>| {
                            if list.is_empty() {
                                view! { <p>"No comments waiting for review."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="admin-comments__list">
                                        {list
                                            .into_iter()
                                            .map(|comment| comment_row(comment, moderate, delete))
                                            .collect::<Vec<_>>()}
                                    </ul>
                                }
                                .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

fn comment_row(
    comment: CommentRow,
    moderate: impl Fn(String, &'static str) + Copy + 'static,
    delete: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    let approve_id = comment.id.clone();
    let reject_id = comment.id.clone();
    let delete_id = comment.id.clone();
    view! {
        <li class="admin-comments__item">
            <p class="admin-comments__meta">
                <strong>{comment.author_name.unwrap_or_else(|| "Anonymous".to_owned())}</strong>
                <span>{comment.created_at.unwrap_or_default()}</span>
            </p>
            <p>{comment.content}</p>
            <div class="admin-comments__actions">
                <button
                    class="btn btn--small"
                    on:click=move |_| moderate(approve_id.clone(), "approved")
                >
                    "Approve"
                </button>
                <button
                    class="btn btn--small"
                    on:click=move |_| moderate(reject_id.clone(), "rejected")
                >
                    "Reject"
                </button>
                <button
                    class="btn btn--small btn--danger"
                    on:click=move |_| delete(delete_id.clone())
                >
                    "Delete"
                </button>
            </div>
        </li>
    }
}
