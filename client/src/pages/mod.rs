//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it loads data through the
//! store's gateway, keeps it in local signals, and reports failures through
//! the notification slot. Form validation lives in plain functions next to
//! each page so it can be tested without a DOM.

pub mod admin_metrics;
pub mod admin_reservations;
pub mod admin_rooms;
pub mod admin_subjects;
pub mod admin_users;
pub mod login;
pub mod my_reservations;
pub mod room_detail;
pub mod rooms;

use leptos::prelude::*;
use session::ApiError;

use crate::state::auth::ClientStore;
use crate::state::notification::NotificationState;
use crate::util::feedback::describe;

/// Report a failed call. A 401 also expires the session.
pub(crate) fn report_failure(
    store: &ClientStore,
    notifications: RwSignal<NotificationState>,
    action: &str,
    error: ApiError,
) {
    store.observe(&error);
    let message = describe(action, &error);
    notifications.update(|n| {
        n.error(message);
    });
}

/// Trimmed input, `None` when blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
