//! Shared fakes for unit tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{StorageError, TransportError};
use crate::routes::AppRoute;
use crate::state::Session;
use crate::storage::{MemoryStorage, SessionStorage};
use crate::store::SessionEvents;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::types::{Identity, Role};

pub(crate) fn identity(id: u64, role: Role) -> Identity {
    Identity {
        id,
        username: format!("user{id}"),
        email: None,
        first_name: String::new(),
        last_name: String::new(),
        role,
        phone: None,
        document: None,
        created_at: None,
        is_active: Some(true),
    }
}

pub(crate) fn json(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse { status, body: body.to_string() })
}

pub(crate) fn login_ok(token: &str, role: &str) -> Result<HttpResponse, TransportError> {
    json(
        200,
        serde_json::json!({
            "token": token,
            "user": {"id": 1, "username": "mlopez", "rol": role}
        }),
    )
}

pub(crate) fn offline() -> Result<HttpResponse, TransportError> {
    Err(TransportError("connection refused".to_owned()))
}

// =============================================================================
// ScriptedTransport
// =============================================================================

/// Replays queued responses in order and records every request it sees.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    yields: bool,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::default(),
            yields: false,
        }
    }

    /// Suspend once before answering, so other tasks interleave.
    pub(crate) fn yielding(mut self) -> Self {
        self.yields = true;
        self
    }

    pub(crate) fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().push_back(response);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests.lock().last().cloned().expect("no request recorded")
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        if self.yields {
            tokio::task::yield_now().await;
        }
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse { status: 200, body: String::new() }))
    }
}

// =============================================================================
// Storage fakes
// =============================================================================

/// Memory storage that rejects writes to one key.
#[derive(Default)]
pub(crate) struct RejectingStorage {
    pub(crate) inner: MemoryStorage,
    pub(crate) reject_key: &'static str,
}

impl SessionStorage for RejectingStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.reject_key {
            return Err(StorageError::Write { key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

// =============================================================================
// RecordingEvents
// =============================================================================

/// Records navigation targets and every session snapshot it is handed.
#[derive(Clone, Default)]
pub(crate) struct RecordingEvents {
    pub(crate) navigations: Arc<Mutex<Vec<AppRoute>>>,
    pub(crate) changes: Arc<Mutex<Vec<Session>>>,
}

impl RecordingEvents {
    pub(crate) fn navigations(&self) -> Vec<AppRoute> {
        self.navigations.lock().clone()
    }

    pub(crate) fn changes(&self) -> Vec<Session> {
        self.changes.lock().clone()
    }
}

impl SessionEvents for RecordingEvents {
    fn navigate(&self, route: AppRoute) {
        self.navigations.lock().push(route);
    }

    fn session_changed(&self, session: &Session) {
        self.changes.lock().push(session.clone());
    }
}
