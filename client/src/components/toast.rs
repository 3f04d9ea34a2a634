//! Auto-dismissing notification toast.

use leptos::prelude::*;

use crate::state::notification::NotificationState;

const DISMISS_AFTER_MS: u32 = 4_000;

#[component]
pub fn Toast() -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationState>>();

    #[cfg(feature = "csr")]
    Effect::new(move || {
        let seq = notifications.with(|n| n.current.as_ref().map(|_| n.seq));
        if let Some(seq) = seq {
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
                notifications.update(|n| n.expire(seq));
            });
        }
    });
    #[cfg(not(feature = "csr"))]
    let _ = DISMISS_AFTER_MS;

    view! {
        {move || {
            notifications
                .get()
                .current
                .map(|current| {
                    view! {
                        <div class=format!("toast {}", current.kind.css_class()) role="status">
                            <strong class="toast__title">{current.title}</strong>
                            <p class="toast__message">{current.message}</p>
                            <button
                                class="toast__close"
                                aria-label="Close"
                                on:click=move |_| notifications.update(NotificationState::close)
                            >
                                "×"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
