//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the one session store for the page lifetime (hydrated from
//! `localStorage`), provides it and its reactive mirrors through context,
//! and declares the route table. Every route except `/` renders inside
//! [`Guarded`].

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use session::config::API_URL_ENV;
use session::{ApiConfig, AppRoute, SessionStore};

use crate::components::guarded::{Guarded, NavigationBridge};
use crate::components::nav_bar::NavBar;
use crate::components::toast::Toast;
use crate::net::transport::BrowserTransport;
use crate::pages::{
    admin_metrics::AdminMetricsPage, admin_reservations::AdminReservationsPage, admin_rooms::AdminRoomsPage,
    admin_subjects::AdminSubjectsPage, admin_users::AdminUsersPage, login::LoginPage,
    my_reservations::MyReservationsPage, room_detail::RoomDetailPage, rooms::RoomsPage,
};
use crate::state::auth::{SharedStore, SignalEvents};
use crate::state::notification::NotificationState;
use crate::util::storage::LocalStorage;
use crate::util::task::spawn;

/// API base baked in at build time.
fn api_config() -> ApiConfig {
    ApiConfig::from_env_value(option_env!("GECOS_API_URL")).unwrap_or_else(|err| {
        leptos::logging::warn!("ignoring invalid {API_URL_ENV}: {err}");
        ApiConfig::default()
    })
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let events = SignalEvents::new();
    let store: SharedStore =
        Arc::new(SessionStore::hydrated(BrowserTransport, api_config(), LocalStorage, events));
    let notifications = RwSignal::new(NotificationState::default());

    provide_context(store.clone());
    provide_context(events);
    provide_context(events.auth);
    provide_context(notifications);

    // Role changes made server-side since the last visit take effect here.
    if store.is_authenticated() {
        let store = store.clone();
        spawn(async move {
            if let Err(err) = store.refresh_identity().await {
                leptos::logging::warn!("identity refresh failed: {err}");
            }
        });
    }

    view! {
        <Title text="GECOS"/>

        <Router>
            <NavigationBridge/>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=AppRoute::Login.path()/> }/>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <Guarded route=AppRoute::Login><LoginPage/></Guarded> }
                    />
                    <Route
                        path=StaticSegment("salones")
                        view=|| view! { <Guarded route=AppRoute::Rooms><RoomsPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("aula"), ParamSegment("id"))
                        view=|| view! { <Guarded route=AppRoute::RoomDetail><RoomDetailPage/></Guarded> }
                    />
                    <Route
                        path=StaticSegment("reservas")
                        view=|| view! { <Guarded route=AppRoute::MyReservations><MyReservationsPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("salones"))
                        view=|| view! { <Guarded route=AppRoute::AdminRooms><AdminRoomsPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("reservas"))
                        view=|| view! { <Guarded route=AppRoute::AdminReservations><AdminReservationsPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("asignaturas"))
                        view=|| view! { <Guarded route=AppRoute::AdminSubjects><AdminSubjectsPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("usuarios"))
                        view=|| view! { <Guarded route=AppRoute::AdminUsers><AdminUsersPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("metricas"))
                        view=|| view! { <Guarded route=AppRoute::AdminMetrics><AdminMetricsPage/></Guarded> }
                    />
                </Routes>
            </main>
            <Toast/>
        </Router>
    }
}
