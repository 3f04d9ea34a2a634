//! Route admission.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated on every navigation attempt against a fresh session snapshot.
//! Nothing is cached between attempts: the session can change in between
//! (logout in another view, an expired token).
//!
//! DESIGN
//! ======
//! Checks run in a fixed order and the first match wins, so an anonymous
//! visitor to an admin page lands on login, not on the landing view.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::AppRoute;
use crate::state::Session;
use crate::types::Role;

/// A navigation attempt plus the static requirements of its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteIntent {
    pub path: String,
    pub requires_authentication: bool,
    pub requires_admin: bool,
    pub requires_guest: bool,
}

impl RouteIntent {
    /// Intent with no requirements.
    #[must_use]
    pub fn open(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_authentication: false,
            requires_admin: false,
            requires_guest: false,
        }
    }
}

/// Guard decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Allow,
    Redirect(AppRoute),
}

/// Decide whether `intent` may proceed given `session`.
#[must_use]
pub fn admit(intent: &RouteIntent, session: &Session) -> Admission {
    if intent.requires_authentication && !session.is_authenticated() {
        return Admission::Redirect(AppRoute::Login);
    }

    if intent.requires_admin {
        match session.role() {
            Some(Role::Admin) => {}
            Some(Role::Instructor | Role::Member) | None => {
                return Admission::Redirect(AppRoute::LANDING);
            }
        }
    }

    if intent.requires_guest && session.is_authenticated() {
        return Admission::Redirect(AppRoute::LANDING);
    }

    Admission::Allow
}
