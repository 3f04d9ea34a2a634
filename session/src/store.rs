//! Session store: owns the session lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed once per client run, hydrated from durable storage, then
//! mutated only through [`SessionStore::login`], [`SessionStore::logout`],
//! [`SessionStore::refresh_identity`] and [`SessionStore::expire`]. Views
//! read it through the derived predicates or a snapshot and reach the remote
//! API through [`SessionStore::gateway`].
//!
//! DESIGN
//! ======
//! The store never talks to a router or a UI toolkit directly. Navigation
//! requests and change notifications go out through [`SessionEvents`], which
//! the browser client maps to signals and the CLI maps to log lines.
//! Events are emitted after the session lock is released.
//!
//! ERROR HANDLING
//! ==============
//! Login failures become `last_error` and are also returned to the caller.
//! Logout never fails: the remote call is best effort and local teardown is
//! unconditional.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::config::ApiConfig;
use crate::error::{ApiError, SessionError, login_error_message};
use crate::gateway::Gateway;
use crate::routes::AppRoute;
use crate::state::{Session, SessionCell};
use crate::storage::{self, Persisted, SessionStorage};
use crate::transport::Transport;
use crate::types::{Credentials, Identity};

/// Message recorded when a granted session cannot be persisted.
pub const STORAGE_LOGIN_ERROR: &str = "Signed in, but the session could not be saved on this device.";

/// Outbound notifications from the store.
pub trait SessionEvents {
    /// Ask the navigation layer to move to `route`.
    fn navigate(&self, route: AppRoute);

    /// Called after every state change with the new snapshot.
    fn session_changed(&self, _session: &Session) {}
}

impl SessionEvents for () {
    fn navigate(&self, _route: AppRoute) {}
}

/// Owner of the session aggregate.
pub struct SessionStore<T, S, E> {
    cell: SessionCell,
    gateway: Gateway<T>,
    storage: S,
    events: E,
}

impl<T, S, E> SessionStore<T, S, E>
where
    T: Transport,
    S: SessionStorage,
    E: SessionEvents,
{
    /// Build an unauthenticated store. Call [`SessionStore::hydrate`] next.
    #[must_use]
    pub fn new(transport: T, config: ApiConfig, storage: S, events: E) -> Self {
        let cell = SessionCell::default();
        let gateway = Gateway::new(transport, config, cell.clone());
        Self { cell, gateway, storage, events }
    }

    /// Build and hydrate in one step.
    #[must_use]
    pub fn hydrated(transport: T, config: ApiConfig, storage: S, events: E) -> Self {
        let store = Self::new(transport, config, storage, events);
        store.hydrate();
        store
    }

    /// Restore the session from durable storage.
    ///
    /// Never fails: absent or unusable entries yield an empty session, and
    /// unusable entries are removed so they cannot resurface later.
    pub fn hydrate(&self) {
        match storage::load(&self.storage) {
            Persisted::Session { token, identity } => {
                tracing::debug!(user_id = identity.id, role = ?identity.role, "session restored");
                self.cell.update(|s| s.establish(token, identity));
            }
            Persisted::Empty => {
                tracing::debug!("no persisted session");
                self.cell.update(Session::clear_credentials);
            }
            Persisted::Stale => {
                tracing::debug!("discarding unusable persisted session");
                if let Err(err) = storage::clear(&self.storage) {
                    tracing::warn!(error = %err, "failed to discard persisted session");
                }
                self.cell.update(Session::clear_credentials);
            }
        }
        self.emit_changed();
    }

    /// Authenticate against the remote API.
    ///
    /// On success the credential and identity are persisted, then set in
    /// memory, and the navigation layer is sent to the landing view.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AuthenticationInProgress`] if another login or
    ///   logout exchange is outstanding; the session is left untouched.
    /// - [`SessionError::Api`] with the original gateway error when the
    ///   remote call fails; `last_error` holds the display message.
    /// - [`SessionError::Storage`] when the granted session cannot be
    ///   persisted; nothing is kept in memory either.
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, SessionError> {
        let started = self.cell.update(|s| {
            if s.is_pending() {
                return false;
            }
            s.set_pending(true);
            s.set_last_error(None);
            true
        });
        if !started {
            tracing::debug!("login rejected: authentication already in progress");
            return Err(SessionError::AuthenticationInProgress);
        }
        self.emit_changed();
        tracing::info!(username = %credentials.username, "login started");

        let grant = match self.gateway.login(credentials).await {
            Ok(grant) => grant,
            Err(err) => {
                tracing::warn!(username = %credentials.username, error = %err, "login failed");
                self.finish_failed_login(login_error_message(&err));
                return Err(SessionError::Api(err));
            }
        };

        if let Err(err) = storage::save(&self.storage, &grant.token, &grant.user) {
            tracing::warn!(error = %err, "failed to persist session");
            self.finish_failed_login(STORAGE_LOGIN_ERROR.to_owned());
            return Err(SessionError::Storage(err));
        }

        let identity = grant.user.clone();
        self.cell.update(|s| {
            s.establish(grant.token, grant.user);
            s.set_pending(false);
        });
        tracing::info!(user_id = identity.id, role = ?identity.role, "login succeeded");
        self.emit_changed();
        self.events.navigate(AppRoute::LANDING);
        Ok(identity)
    }

    fn finish_failed_login(&self, message: String) {
        self.cell.update(|s| {
            s.set_last_error(Some(message));
            s.set_pending(false);
        });
        self.emit_changed();
    }

    /// End the session.
    ///
    /// The remote logout is only attempted when a credential is held, and
    /// its failure is logged, never returned. Local state and storage are
    /// always cleared and the navigation layer is sent to the login view.
    ///
    /// A pending flag already held by an outstanding login is left alone;
    /// only the flag this call raised is released.
    pub async fn logout(&self) {
        let (authenticated, claimed) = self.cell.update(|s| {
            let authenticated = s.is_authenticated();
            let claimed = authenticated && !s.is_pending();
            if claimed {
                s.set_pending(true);
            }
            (authenticated, claimed)
        });
        if authenticated {
            if claimed {
                self.emit_changed();
            }
            if let Err(err) = self.gateway.logout().await {
                tracing::warn!(error = %err, "remote logout failed; clearing local session anyway");
            }
        }

        self.teardown(claimed);
        tracing::info!("logged out");
        self.events.navigate(AppRoute::Login);
    }

    /// Drop the local session without notifying the remote API.
    ///
    /// Used when the API reports the credential as no longer valid.
    pub fn expire(&self) {
        if !self.cell.read(Session::is_authenticated) {
            return;
        }
        tracing::info!("session expired");
        self.teardown(false);
        self.events.navigate(AppRoute::Login);
    }

    fn teardown(&self, release_pending: bool) {
        if let Err(err) = storage::clear(&self.storage) {
            tracing::warn!(error = %err, "failed to clear persisted session");
        }
        self.cell.update(|s| {
            s.clear_credentials();
            if release_pending {
                s.set_pending(false);
            }
        });
        self.emit_changed();
    }

    /// Re-fetch the identity behind the current credential.
    ///
    /// A 401 means the token is dead: the session is expired locally.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotAuthenticated`] when no credential is held.
    /// - [`SessionError::Api`] for any remote failure (including the 401
    ///   that expired the session).
    /// - [`SessionError::Storage`] when the new identity cannot be persisted.
    pub async fn refresh_identity(&self) -> Result<Identity, SessionError> {
        let Some(token) = self.cell.credential() else {
            return Err(SessionError::NotAuthenticated);
        };

        let identity = match self.gateway.current_user().await {
            Ok(identity) => identity,
            Err(err) => {
                if err.is_unauthorized() {
                    self.expire();
                }
                return Err(SessionError::Api(err));
            }
        };

        // The session may have ended while the request was in flight.
        if self.cell.credential().as_deref() != Some(token.as_str()) {
            return Err(SessionError::NotAuthenticated);
        }

        storage::save(&self.storage, &token, &identity)?;
        self.cell.update(|s| s.replace_identity(identity.clone()));
        tracing::debug!(user_id = identity.id, role = ?identity.role, "identity refreshed");
        self.emit_changed();
        Ok(identity)
    }

    /// Expire the session when a view's API call was rejected as
    /// unauthorized. Returns whether it did.
    pub fn observe(&self, error: &ApiError) -> bool {
        let unauthorized = error.is_unauthorized();
        if unauthorized {
            self.expire();
        }
        unauthorized
    }

    fn emit_changed(&self) {
        let snapshot = self.cell.snapshot();
        self.events.session_changed(&snapshot);
    }

    // =========================================================================
    // READ SIDE
    // =========================================================================

    #[must_use]
    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    /// Shared handle to the live session.
    #[must_use]
    pub fn cell(&self) -> &SessionCell {
        &self.cell
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.cell.read(Session::is_authenticated)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.cell.read(Session::is_admin)
    }

    #[must_use]
    pub fn is_instructor(&self) -> bool {
        self.cell.read(Session::is_instructor)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.cell.read(Session::is_pending)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.cell.read(|s| s.last_error().map(ToOwned::to_owned))
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.cell.read(|s| s.identity().cloned())
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }
}
