//! Broadcast composer for announcement emails.

use leptos::prelude::*;

use crate::net::types::BroadcastDraft;
use crate::state::notices::NoticeState;

/// Compose a broadcast row. Delivery itself happens server-side; this
/// page only records what to send and, optionally, when.
#[component]
pub fn AdminBroadcastPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let image_url = RwSignal::new(String::new());
    let scheduled_for = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let send = move || {
        let title_value = title.get();
        let content_value = content.get();
        if title_value.trim().is_empty() || content_value.trim().is_empty() || busy.get() {
            return;
        }
        let draft = BroadcastDraft {
            title: title_value.trim().to_owned(),
            content: content_value,
            image_url: Some(image_url.get()).filter(|u| !u.trim().is_empty()),
            scheduled_for: Some(scheduled_for.get()).filter(|s| !s.trim().is_empty()),
        };

        #[cfg(feature = "hydrate")]
        {
            busy.set(true);
            leptos::task::spawn_local(async move {
                let result = crate::net::rest::create_broadcast(&draft).await;
                busy.set(false);
                match result {
                    Ok(()) => {
                        title.set(String::new());
                        content.set(String::new());
                        image_url.set(String::new());
                        scheduled_for.set(String::new());
                        notices.update(|n| {
                            n.push_info("Broadcast queued.");
                        });
                    }
                    Err(err) => notices.update(|n| {
                        n.push_error(err);
                    }),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (draft, notices);
        }
    };

    view! {
        <div class="admin-broadcast">
            <h1>"Broadcast"</h1>
            <label class="admin-broadcast__label">
                "Title"
                <input
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>
            <label class="admin-broadcast__label">
                "Content"
                <textarea
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
            </label>
            <label class="admin-broadcast__label">
                "Image URL (optional)"
                <input
                    type="url"
                    prop:value=move || image_url.get()
                    on:input=move |ev| image_url.set(event_target_value(&ev))
                />
            </label>
            <label class="admin-broadcast__label">
                "Schedule for (optional)"
                <input
                    type="datetime-local"
                    prop:value=move || scheduled_for.get()
                    on:input=move |ev| scheduled_for.set(event_target_value(&ev))
                />
            </label>
            <button
                class="btn btn--primary"
                disabled=move || busy.get()
                on:click=move |_| send()
            >
                {move || if busy.get() { "Sending..." } else { "Send broadcast" }}
            </button>
        </div>
    }
}
