//! Top navigation bar.
//!
//! Links are derived from the session: guests see nothing but the brand,
//! authenticated users get the booking views, admins also get the admin
//! section.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::AppRoute;

use crate::state::auth::{AuthState, SharedStore};
use crate::util::task::spawn;

/// Visible navigation entries for `state`.
pub fn nav_links(state: &AuthState) -> Vec<(AppRoute, &'static str)> {
    if !state.is_authenticated() {
        return Vec::new();
    }
    let mut links = vec![(AppRoute::Rooms, "Rooms"), (AppRoute::MyReservations, "My reservations")];
    if state.is_admin() {
        links.extend([
            (AppRoute::AdminRooms, "Manage rooms"),
            (AppRoute::AdminReservations, "All reservations"),
            (AppRoute::AdminSubjects, "Subjects"),
            (AppRoute::AdminUsers, "Users"),
            (AppRoute::AdminMetrics, "Metrics"),
        ]);
    }
    links
}

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<SharedStore>();

    let on_logout = move |_| {
        let store = store.clone();
        spawn(async move { store.logout().await });
    };

    view! {
        <header class="nav-bar">
            <span class="nav-bar__brand">"GECOS"</span>
            <nav class="nav-bar__links">
                {move || {
                    nav_links(&auth.get())
                        .into_iter()
                        .map(|(route, label)| view! { <A href=route.path()>{label}</A> })
                        .collect_view()
                }}
            </nav>
            <span class="nav-bar__spacer"></span>
            <Show when=move || auth.get().is_authenticated()>
                <span class="nav-bar__user">
                    {move || auth.get().display_name().unwrap_or_default()}
                    " ("
                    {move || auth.get().session.role().map(|r| r.label()).unwrap_or_default()}
                    ")"
                </span>
                <button
                    class="btn nav-bar__logout"
                    disabled=move || auth.get().is_pending()
                    on:click=on_logout.clone()
                >
                    "Sign out"
                </button>
            </Show>
        </header>
    }
}
