//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store owns the truth. [`SignalEvents`] mirrors every store
//! change into an `RwSignal<AuthState>` so route guards and user-aware
//! components re-render, and turns store navigation requests into a pending
//! redirect that the router-side bridge consumes.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{Admission, AppRoute, Identity, RouteIntent, Session, SessionEvents, SessionStore, admit};

use crate::net::transport::BrowserTransport;
use crate::util::storage::LocalStorage;

/// The store as wired for the browser.
pub type ClientStore = SessionStore<BrowserTransport, LocalStorage, SignalEvents>;

/// Shared handle provided through Leptos context.
pub type SharedStore = Arc<ClientStore>;

/// Reactive mirror of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Session,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    /// Name shown in the navigation bar.
    pub fn display_name(&self) -> Option<String> {
        self.identity().map(Identity::display_name)
    }

    /// Guard decision for `route` reached at `path`.
    pub fn admission(&self, route: AppRoute, path: &str) -> Admission {
        admit(&route.intent(path), &self.session)
    }

    /// Guard decision for an arbitrary path.
    pub fn admission_for_path(&self, path: &str) -> Admission {
        admit(&RouteIntent::for_path(path), &self.session)
    }
}

/// Store event sink backed by Leptos signals.
#[derive(Clone, Copy, Debug)]
pub struct SignalEvents {
    pub auth: RwSignal<AuthState>,
    pub redirect: RwSignal<Option<AppRoute>>,
}

impl SignalEvents {
    pub fn new() -> Self {
        Self {
            auth: RwSignal::new(AuthState::default()),
            redirect: RwSignal::new(None),
        }
    }
}

impl Default for SignalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEvents for SignalEvents {
    fn navigate(&self, route: AppRoute) {
        self.redirect.set(Some(route));
    }

    fn session_changed(&self, session: &Session) {
        let next = AuthState { session: session.clone() };
        self.auth.set(next);
    }
}
