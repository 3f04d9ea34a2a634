//! User-facing wording for failed API calls.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use session::{ApiError, SessionError};

/// Message shown in a notification after `action` failed with `error`.
///
/// Server-provided text wins; otherwise the wording follows the status class.
pub fn describe(action: &str, error: &ApiError) -> String {
    if let Some(message) = error.message() {
        return message.to_owned();
    }
    match error {
        ApiError::Transport(_) => format!("Could not {action}: the server is unreachable."),
        ApiError::Decode(_) | ApiError::Encode(_) => {
            format!("Could not {action}: unexpected data.")
        }
        ApiError::Status { status: 401, .. } => {
            "Your session has expired. Please sign in again.".to_owned()
        }
        ApiError::Status { status: 403, .. } => format!("You are not allowed to {action}."),
        ApiError::Status { status: 404, .. } => format!("Could not {action}: not found."),
        ApiError::Status { status, .. } if *status >= 500 => {
            format!("Could not {action}: server error ({status}).")
        }
        ApiError::Status { status, .. } => format!("Could not {action} ({status})."),
    }
}

/// Same as [`describe`] for store operations.
pub fn describe_session(action: &str, error: &SessionError) -> String {
    match error.api() {
        Some(api) => describe(action, api),
        None => error.to_string(),
    }
}
