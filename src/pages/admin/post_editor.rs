//! Post editor used for both `/admin/posts/new` and `/admin/posts/edit/:id`.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::spinner::Spinner;
use crate::net::types::{Category, PostDraft};
use crate::state::auth::AuthState;
use crate::state::notices::NoticeState;
use crate::util::slug::slugify;

/// Shared create/edit form. The `:id` route param decides the mode:
/// absent means a new post, present means the existing row is loaded
/// into the form and saved with PATCH.
#[component]
pub fn PostEditorPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    let params = use_params_map();
    let edit_id = move || params.get().get("id");

    let title = RwSignal::new(String::new());
    let excerpt = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let featured_image = RwSignal::new(String::new());
    let category_id = RwSignal::new(String::new());
    let status = RwSignal::new("draft".to_owned());
    let loaded = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let categories = LocalResource::new(|| async {
        crate::net::rest::fetch_categories()
            .await
            .unwrap_or_default()
    });

    let existing = LocalResource::new(move || {
        let id = edit_id();
        async move {
            match id {
                Some(id) => crate::net::rest::fetch_post_by_id(&id).await,
                None => None,
            }
        }
    });

    // Seed the form once when editing; typing after that wins.
    Effect::new(move || {
        if loaded.get() {
            return;
        }
        if let Some(Some(post)) = existing.get() {
            title.set(post.title);
            excerpt.set(post.excerpt.unwrap_or_default());
            content.set(post.content.unwrap_or_default());
            featured_image.set(post.featured_image.unwrap_or_default());
            category_id.set(post.category_id.unwrap_or_default());
            status.set(post.status.unwrap_or_else(|| "draft".to_owned()));
            loaded.set(true);
        }
    });

    let save = move || {
        let title_value = title.get();
        if title_value.trim().is_empty() || busy.get() {
            return;
        }
        let draft = PostDraft {
            title: title_value.trim().to_owned(),
            slug: slugify(title_value.trim()),
            excerpt: excerpt.get().trim().to_owned(),
            content: content.get(),
            featured_image: featured_image.get().trim().to_owned(),
            category_id: Some(category_id.get()).filter(|c| !c.is_empty()),
            author_id: auth.get_untracked().identity.map(|i| i.id),
            status: status.get(),
        };
        let id = edit_id();

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match id {
                    Some(id) => crate::net::rest::update_post(&id, &draft).await,
                    None => crate::net::rest::create_post(&draft).await,
                };
                busy.set(false);
                match result {
                    Ok(()) => {
                        notices.update(|n| {
                            n.push_info("Post saved.");
                        });
                        navigate("/admin/posts", NavigateOptions::default());
                    }
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, draft, &navigate, notices);
        }
    };

    view! {
        <div class="post-editor">
            <h1>{move || if edit_id().is_some() { "Edit post" } else { "New post" }}</h1>

            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    // Wait for the existing row before showing the form in
                    // edit mode, so the seed effect runs against real data.
                    existing.get().map(|_| ())
                }}
            </Suspense>

            <label class="post-editor__label">
                "Title"
                <input
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>
            <label class="post-editor__label">
                "Excerpt"
                <input
                    type="text"
                    prop:value=move || excerpt.get()
                    on:input=move |ev| excerpt.set(event_target_value(&ev))
                />
            </label>
            <label class="post-editor__label">
                "Content"
                <textarea
                    class="post-editor__content"
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
            </label>
            <label class="post-editor__label">
                "Featured image URL"
                <input
                    type="url"
                    prop:value=move || featured_image.get()
                    on:input=move |ev| featured_image.set(event_target_value(&ev))
                />
            </label>
            <label class="post-editor__label">
                "Category"
                <select
                    prop:value=move || category_id.get()
                    on:change=move |ev| category_id.set(event_target_value(&ev))
                >
                    <option value="">"(none)"</option>
                    <Suspense fallback=|| ()>
                        {move || {
                            categories
                                .get()
                                .map(|list: Vec<Category>| {
                                    list.into_iter()
                                        .map(|c| view! {
                                            <option value=c.id>{c.name}</option>
                                        })
                                        .collect::<Vec<_>>()
                                })
                        }}
                    </Suspense>
                </select>
            </label>
            <label class="post-editor__label">
                "Status"
                <select
                    prop:value=move || status.get()
                    on:change=move |ev| status.set(event_target_value(&ev))
                >
                    <option value="draft">"Draft"</option>
                    <option value="published">"Published"</option>
                </select>
            </label>

            <div class="post-editor__actions">
                <button
                    class="btn btn--primary"
                    disabled=move || busy.get()
                    on:click=move |_| save()
                >
                    {move || if busy.get() { "Saving..." } else { "Save" }}
                </button>
                <a class="btn" href="/admin/posts">
                    "Cancel"
                </a>
            </div>
        </div>
    }
}
