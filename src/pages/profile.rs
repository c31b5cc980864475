//! Signed-in user's profile page.

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::types::{Post, Profile, ProfileUpdate};
use crate::state::auth::AuthState;
use crate::state::notices::NoticeState;

/// Profile editor plus the user's own posts. Reachable only behind the
/// authentication gate, so the identity is present once loading ends.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let user_id = move || auth.get().identity.map(|i| i.id).unwrap_or_default();

    let full_name = RwSignal::new(String::new());
    let avatar_url = RwSignal::new(String::new());
    let website = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let loaded = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let profile = LocalResource::new(move || {
        let id = user_id();
        async move {
            if id.is_empty() {
                return None;
            }
            crate::net::rest::fetch_profile(&id).await
        }
    });

    let own_posts = LocalResource::new(move || {
        let id = user_id();
        async move {
            if id.is_empty() {
                return Vec::new();
            }
            crate::net::rest::fetch_posts_by_author(&id)
                .await
                .unwrap_or_default()
        }
    });

    // Seed the form once from the fetched row; edits after that win.
    Effect::new(move || {
        if loaded.get() {
            return;
        }
        if let Some(Some(row)) = profile.get() {
            full_name.set(row.full_name.unwrap_or_default());
            avatar_url.set(row.avatar_url.unwrap_or_default());
            website.set(row.website.unwrap_or_default());
            bio.set(row.bio.unwrap_or_default());
            loaded.set(true);
        }
    });

    let save = move || {
        if busy.get() {
            return;
        }
        let id = user_id();
        let update = ProfileUpdate {
            full_name: full_name.get().trim().to_owned(),
            avatar_url: avatar_url.get().trim().to_owned(),
            website: website.get().trim().to_owned(),
            bio: bio.get().trim().to_owned(),
        };

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            leptos::task::spawn_local(async move {
                let result = crate::net::rest::update_profile(&id, &update).await;
                busy.set(false);
                match result {
                    Ok(()) => notices.update(|n| {
                        n.push_info("Profile saved.");
                    }),
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, update, notices);
        }
    };

    view! {
        <div class="profile-page">
            <h1>"Your profile"</h1>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    profile
                        .get()
                        .map(|row: Option<Profile>| {
                            let role = row
                                .and_then(|r| r.role)
                                .unwrap_or_else(|| "user".to_owned());
                            view! {
                                <p class="profile-page__role">"Role: " {role}</p>
                            }
                        })
                }}
            </Suspense>

            <label class="profile-page__label">
                "Full name"
                <input
                    type="text"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
            </label>
            <label class="profile-page__label">
                "Avatar URL"
                <input
                    type="url"
                    prop:value=move || avatar_url.get()
                    on:input=move |ev| avatar_url.set(event_target_value(&ev))
                />
            </label>
            <label class="profile-page__label">
                "Website"
                <input
                    type="url"
                    prop:value=move || website.get()
                    on:input=move |ev| website.set(event_target_value(&ev))
                />
            </label>
            <label class="profile-page__label">
                "Bio"
                <textarea
                    prop:value=move || bio.get()
                    on:input=move |ev| bio.set(event_target_value(&ev))
                ></textarea>
            </label>
            <button
                class="btn btn--primary"
                disabled=move || busy.get()
                on:click=move |_| save()
            >
                {move || if busy.get() { "Saving..." } else { "Save profile" }}
            </button>

            <h2>"Your posts"</h2>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    own_posts
                        .get()
                        .map(|posts: Vec<Post>| {
                            if posts.is_empty() {
                                view! { <p>"You have not written any posts."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="profile-page__posts">
                                        {posts
                                            .into_iter()
                                            .map(|post| view! {
                                                <li>
                                                    <a href=format!("/posts/{}", post.slug)>
                                                        {post.title}
                                                    </a>
                                                    <span class="profile-page__status">
                                                        {post.status.unwrap_or_default()}
                                                    </span>
                                                </li>
                                            })
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
