//! Admin category management.

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::types::Category;
use crate::state::notices::NoticeState;
use crate::util::slug::slugify;

/// Category list with add and delete. Slugs derive from the name.
#[component]
pub fn AdminCategoriesPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    let categories = LocalResource::new(|| async {
        crate::net::rest::fetch_categories()
            .await
            .unwrap_or_default()
    });

    let new_name = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let add = move || {
        let name = new_name.get();
        if name.trim().is_empty() || busy.get() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            let name = name.trim().to_owned();
            leptos::task::spawn_local(async move {
                let slug = slugify(&name);
                let result = crate::net::rest::create_category(&name, &slug).await;
                busy.set(false);
                match result {
                    Ok(()) => {
                        new_name.set(String::new());
                        categories.refetch();
                    }
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (name, notices, categories);
        }
    };

    let delete = move |id: String| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::rest::delete_category(&id).await {
                    Ok(()) => categories.refetch(),
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, notices, categories);
        }
    };

    view! {
        <div class="admin-categories">
            <h1>"Categories"</h1>

            <div class="admin-categories__add">
                <input
                    type="text"
                    placeholder="Category name"
                    prop:value=move || new_name.get()
                    on:input=move |ev| new_name.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add();
                        }
                    }
                />
                <button
                    class="btn btn--primary"
                    disabled=move || busy.get()
                    on:click=move |_| add()
                >
                    "Add"
                </button>
            </div>

            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    categories
                        .get()
                        .map(|list: Vec<Category>| {
                            if list.is_empty() {
                                view! { <p>"No categories yet."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="admin-categories__list">
                                        {list
                                            .into_iter()
                                            .map(|category| {
                                                let id = category.id.clone();
                                                view! {
                                                    <li>
                                                        <span>{category.name}</span>
                                                        <code>{category.slug}</code>
                                                        <button
                                                            class="btn btn--small btn--danger"
                                                            on:click=move |_| delete(id.clone())
                                                        >
                                                            "Delete"
                                                        </button>
                                                    </li>
                                                }
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
