//! Route admission wrapper and the store-to-router bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page renders inside [`Guarded`]. The guard decision is a memo
//! over the current path and the reactive session mirror, so it is
//! re-evaluated on every navigation and on every session change (logout in
//! another view, an expired token). Redirects replace the history entry.
//!
//! [`NavigationBridge`] executes navigation requests issued by the session
//! store (after login, logout, expiry).

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{Admission, AppRoute};

use crate::state::auth::{AuthState, SignalEvents};

/// Render `children` only while `route` admits the current session.
#[component]
pub fn Guarded(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let navigate = use_navigate();

    let admission = Memo::new(move |_| {
        let path = location.pathname.get();
        auth.with(|state| state.admission(route, &path))
    });

    Effect::new(move || {
        if let Admission::Redirect(target) = admission.get() {
            navigate(target.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || admission.get() == Admission::Allow
            fallback=|| view! { <p class="page-status">"Redirecting..."</p> }
        >
            {children()}
        </Show>
    }
}

/// Consume store navigation requests. Must live inside `<Router>`.
#[component]
pub fn NavigationBridge() -> impl IntoView {
    let events = expect_context::<SignalEvents>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(route) = events.redirect.get() {
            events.redirect.set(None);
            navigate(route.path(), NavigateOptions::default());
        }
    });
}
