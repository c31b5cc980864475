//! Admin post list with edit and delete actions.

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::types::Post;
use crate::state::notices::NoticeState;

/// Every post regardless of status, newest first.
#[component]
pub fn AdminPostsPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    let posts = LocalResource::new(|| async {
        crate::net::rest::fetch_all_posts().await.unwrap_or_default()
    });

    let delete = move |id: String| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::rest::delete_post(&id).await {
                    Ok(()) => posts.refetch(),
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, notices, posts);
        }
    };

    view! {
        <div class="admin-posts">
            <header class="admin-posts__header">
                <h1>"Posts"</h1>
                <a class="btn btn--primary" href="/admin/posts/new">
                    "New post"
                </a>
            </header>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    posts
                        .get()
                        .map(|list: Vec<Post>| {
                            if list.is_empty() {
                                view! { <p>"No posts yet."</p> }.into_any()
                            } else {
                                view! {
                                    <table class="admin-table">
                                        <thead>
                                            <tr>
                                                <th>"Title"</th>
                                                <th>"Status"</th>
                                                <th>"Created"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .map(|post| post_row(post, delete))
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                }
                                .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

fn post_row(post: Post, delete: impl Fn(String) + Copy + 'static) -> impl IntoView {
    let id = post.id.clone();
    view! {
        <tr>
            <td>
                <a href=format!("/posts/{}", post.slug)>{post.title}</a>
            </td>
            <td>{post.status.unwrap_or_default()}</td>
            <td>{post.created_at.unwrap_or_default()}</td>
            <td class="admin-table__actions">
                <a class="btn btn--small" href=format!("/admin/posts/edit/{}", post.id)>
                    "Edit"
                </a>
                <button class="btn btn--small btn--danger" on:click=move |_| delete(id.clone())>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
