//! The session aggregate and its shared handle.
//!
//! DESIGN
//! ======
//! [`Session`] is plain data: credential, identity, the pending flag, and the
//! last authentication error. The pairing invariant (identity present iff
//! credential present) is enforced by only exposing mutators that set or
//! clear both together.
//!
//! [`SessionCell`] is the one shared handle. The store mutates through it and
//! the gateway reads the credential through it at request time, so header
//! decoration always sees the live token.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::{Identity, Role};

/// Where the client run currently sits in the authentication state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    /// A login exchange is outstanding and no credential is held yet.
    Authenticating,
    Authenticated(Role),
}

/// Authentication state for the current client run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    credential: Option<String>,
    identity: Option<Identity>,
    pending: bool,
    last_error: Option<String>,
}

impl Session {
    /// An authenticated session. Empty tokens are not credentials.
    #[must_use]
    pub fn authenticated(token: impl Into<String>, identity: Identity) -> Self {
        let mut session = Self::default();
        session.establish(token.into(), identity);
        session
    }

    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    /// True while a login or logout exchange is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    #[must_use]
    pub fn is_instructor(&self) -> bool {
        self.role() == Some(Role::Instructor)
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        match (self.role(), self.pending) {
            (Some(role), _) => AuthPhase::Authenticated(role),
            (None, true) => AuthPhase::Authenticating,
            (None, false) => AuthPhase::Unauthenticated,
        }
    }

    pub(crate) fn establish(&mut self, token: String, identity: Identity) {
        if token.is_empty() {
            self.clear_credentials();
            return;
        }
        self.credential = Some(token);
        self.identity = Some(identity);
    }

    /// Replace the identity of an authenticated session. No-op otherwise.
    pub(crate) fn replace_identity(&mut self, identity: Identity) {
        if self.credential.is_some() {
            self.identity = Some(identity);
        }
    }

    pub(crate) fn clear_credentials(&mut self) {
        self.credential = None;
        self.identity = None;
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub(crate) fn set_last_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }
}

/// Shared, live handle to the session.
///
/// Cloning the cell shares the underlying state. Lock guards never escape
/// this type, so no caller can hold one across an `.await`.
#[derive(Clone, Debug, Default)]
pub struct SessionCell {
    inner: Arc<RwLock<Session>>,
}

impl SessionCell {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { inner: Arc::new(RwLock::new(session)) }
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    /// Current bearer token, read at call time.
    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.inner.read().credential.clone()
    }

    /// Read a derived value without cloning the whole session.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.read())
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.write())
    }
}
