//! Transient notice banners for operation results.

use leptos::prelude::*;

use crate::state::notices::{NoticeKind, NoticeState};

/// Stacked dismissable banners fed by `NoticeState`. Pages push a notice
/// after a fallible operation instead of raising.
#[component]
pub fn NoticeList() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    // Info banners clear themselves after a few seconds; errors stay
    // until dismissed.
    let seen = RwSignal::new(0u64);
    Effect::new(move || {
        for notice in notices.get().items {
            if notice.id < seen.get_untracked() {
                continue;
            }
            seen.set(notice.id + 1);
            if notice.kind == NoticeKind::Info {
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    gloo_timers::future::sleep(std::time::Duration::from_secs(5)).await;
                    notices.update(|n| n.dismiss(notice.id));
                });
            }
        }
    });

    view! {
        <div class="notices">
            {move || {
                notices
                    .get()
                    .items
                    .into_iter()
                    .map(|notice| {
                        let class = match notice.kind {
                            NoticeKind::Info => "notice notice--info",
                            NoticeKind::Error => "notice notice--error",
                        };
                        let id = notice.id;
                        view! {
                            <div class=class>
                                <span class="notice__message">{notice.message}</span>
                                <button
                                    class="notice__dismiss"
                                    on:click=move |_| notices.update(|n| n.dismiss(id))
                                >
                                    "x"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
