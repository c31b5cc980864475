//! Post search page.

use leptos::prelude::*;

use crate::components::post_card::PostCard;
use crate::components::spinner::Spinner;

/// Title/excerpt search over published posts. The query only runs when
/// the visitor submits, not on every keystroke.
#[component]
pub fn SearchPage() -> impl IntoView {
    let input = RwSignal::new(String::new());
    let submitted = RwSignal::new(String::new());

    let results = LocalResource::new(move || {
        let term = submitted.get();
        async move {
            if term.trim().is_empty() {
                return None;
            }
            crate::net::rest::search_posts(term.trim()).await
        }
    });

    let run_search = move || submitted.set(input.get());

    view! {
        <div class="search-page">
            <h1>"Search"</h1>
            <div class="search-page__bar">
                <input
                    type="search"
                    placeholder="Search posts"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            run_search();
                        }
                    }
                />
                <button class="btn" on:click=move |_| run_search()>
                    "Search"
                </button>
            </div>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    results
                        .get()
                        .map(|found| match found {
                            Some(list) if !list.is_empty() => view! {
                                <div class="search-page__grid">
                                    {list
                                        .into_iter()
                                        .map(|post| view! { <PostCard post=post/> })
                                        .collect::<Vec<_>>()}
                                </div>
                            }
                            .into_any(),
                            Some(_) => view! { <p>"No posts matched."</p> }.into_any(),
                            None => ().into_any(),
                        })
                }}
            </Suspense>
        </div>
    }
}
