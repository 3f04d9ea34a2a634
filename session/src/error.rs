//! Error taxonomy for the session core.
//!
//! ERROR HANDLING
//! ==============
//! Transport and API errors propagate unchanged from the [`Gateway`] to its
//! caller. The session store is the only place that turns an authentication
//! failure into display state (`last_error`); it still hands the original
//! error back wrapped in [`SessionError::Api`].
//!
//! [`Gateway`]: crate::gateway::Gateway

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Fallback shown when a failed login carries no usable message.
pub const GENERIC_LOGIN_ERROR: &str = "Unable to sign in. Please try again.";

/// Invalid API base configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    Empty,
    #[error("invalid API base URL `{value}`: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("unsupported API base URL scheme `{0}`")]
    UnsupportedScheme(String),
}

/// The request never produced an HTTP response (network down, CORS, DNS).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Failure of a single gateway call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Remote API answered with a non-2xx status.
    #[error("request failed with status {status}{}", message_suffix(.message))]
    Status {
        status: u16,
        message: Option<String>,
        body: Value,
    },
    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response payload: {0}")]
    Decode(String),
    #[error("failed to encode request payload: {0}")]
    Encode(String),
}

impl ApiError {
    /// Build a status error from a raw response body, extracting the
    /// structured message when the body is JSON.
    #[must_use]
    pub fn from_status(status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str::<Value>(raw_body).unwrap_or_else(|_| {
            if raw_body.trim().is_empty() {
                Value::Null
            } else {
                Value::String(raw_body.to_owned())
            }
        });
        let message = payload_message(&body);
        Self::Status { status, message, body }
    }

    /// HTTP status, when the remote API answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured message from the error payload, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The credential was rejected (expired or revoked token).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Pull a human-readable message out of an error payload.
///
/// Looks at `error` first (login/logout views), then `detail` (framework
/// permission errors). Anything else yields `None`.
#[must_use]
pub fn payload_message(body: &Value) -> Option<String> {
    ["error", "detail"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

/// Message recorded in `last_error` after a failed login.
#[must_use]
pub fn login_error_message(error: &ApiError) -> String {
    error
        .message()
        .map_or_else(|| GENERIC_LOGIN_ERROR.to_owned(), ToOwned::to_owned)
}

/// Durable client storage refused a write or delete.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}` to session storage: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to remove `{key}` from session storage: {reason}")]
    Remove { key: String, reason: String },
    #[error("failed to serialize identity: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure of a session store operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A login was attempted while another authentication exchange was
    /// still outstanding.
    #[error("another sign-in is already in progress")]
    AuthenticationInProgress,
    #[error("operation requires an authenticated session")]
    NotAuthenticated,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Underlying API error, when the failure came from the remote side.
    #[must_use]
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}
