use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::state::AuthPhase;
use crate::storage::{IDENTITY_KEY, MemoryStorage, TOKEN_KEY};
use crate::test_support::{
    RecordingEvents, RejectingStorage, ScriptedTransport, json, login_ok, offline,
};
use crate::types::Role;

type TestStore = SessionStore<ScriptedTransport, Arc<MemoryStorage>, RecordingEvents>;

struct Harness {
    store: TestStore,
    transport: ScriptedTransport,
    storage: Arc<MemoryStorage>,
    events: RecordingEvents,
}

fn harness(storage: MemoryStorage) -> Harness {
    let transport = ScriptedTransport::default();
    let storage = Arc::new(storage);
    let events = RecordingEvents::default();
    let store = SessionStore::hydrated(
        transport.clone(),
        ApiConfig::default(),
        Arc::clone(&storage),
        events.clone(),
    );
    Harness { store, transport, storage, events }
}

fn persisted(token: &str, user: &serde_json::Value) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.write(TOKEN_KEY, token).expect("write token");
    storage.write(IDENTITY_KEY, &user.to_string()).expect("write user");
    storage
}

fn assert_paired(store: &TestStore) {
    let session = store.snapshot();
    assert_eq!(
        session.credential().is_some(),
        session.identity().is_some(),
        "credential and identity must be set together: {session:?}"
    );
}

fn credentials() -> Credentials {
    Credentials::new("mlopez", "secret")
}

// =============================================================================
// hydrate
// =============================================================================

#[test]
fn hydrate_restores_persisted_session() {
    let h = harness(persisted("abc", &json!({"id": 1, "role": "admin"})));
    assert!(h.store.is_authenticated());
    assert!(h.store.is_admin());
    assert!(!h.store.is_pending());
    assert_eq!(h.store.snapshot().credential(), Some("abc"));
    assert_paired(&h.store);
}

#[test]
fn hydrate_with_empty_storage_is_unauthenticated() {
    let h = harness(MemoryStorage::new());
    assert!(!h.store.is_authenticated());
    assert_eq!(h.store.snapshot().phase(), AuthPhase::Unauthenticated);
    assert_paired(&h.store);
}

#[test]
fn hydrate_with_token_only_discards_entries() {
    let storage = MemoryStorage::new();
    storage.write(TOKEN_KEY, "abc").expect("write token");
    let h = harness(storage);
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
}

#[test]
fn hydrate_with_malformed_identity_discards_entries() {
    let storage = MemoryStorage::new();
    storage.write(TOKEN_KEY, "abc").expect("write token");
    storage.write(IDENTITY_KEY, "{not json").expect("write user");
    let h = harness(storage);
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
    assert_paired(&h.store);
}

#[test]
fn hydrate_with_blank_token_is_unauthenticated() {
    let h = harness(persisted("", &json!({"id": 1, "rol": "docente"})));
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
}

#[test]
fn hydrate_makes_no_network_calls() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "docente"})));
    assert!(h.transport.requests().is_empty());
    assert!(h.store.is_instructor());
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_success_sets_state_persists_and_navigates() {
    let h = harness(MemoryStorage::new());
    h.transport.push(login_ok("tok-1", "docente"));

    let identity = h.store.login(&credentials()).await.expect("login");

    assert_eq!(identity.username, "mlopez");
    assert_eq!(identity.role, Role::Instructor);
    assert!(h.store.is_authenticated());
    assert!(h.store.is_instructor());
    assert!(!h.store.is_admin());
    assert!(!h.store.is_pending());
    assert_eq!(h.store.last_error(), None);
    assert_eq!(h.storage.read(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert!(h.storage.read(IDENTITY_KEY).is_some());
    assert_eq!(h.events.navigations(), vec![AppRoute::Rooms]);
    assert_paired(&h.store);
}

#[tokio::test]
async fn login_request_carries_no_authorization_header() {
    let h = harness(MemoryStorage::new());
    h.transport.push(login_ok("tok-1", "admin"));

    h.store.login(&credentials()).await.expect("login");

    let request = h.transport.last_request();
    assert!(request.url.ends_with("/login/"));
    assert_eq!(request.header("Authorization"), None);
    let body: serde_json::Value =
        serde_json::from_str(request.body.as_deref().expect("body")).expect("json body");
    assert_eq!(body, json!({"username": "mlopez", "password": "secret"}));
}

#[tokio::test]
async fn login_failure_records_error_and_returns_it() {
    let h = harness(MemoryStorage::new());
    h.transport.push(json(401, json!({"error": "invalid credentials"})));

    let err = h.store.login(&credentials()).await.expect_err("must fail");

    assert_eq!(err.api().and_then(ApiError::status), Some(401));
    assert_eq!(h.store.last_error().as_deref(), Some("invalid credentials"));
    assert!(!h.store.is_authenticated());
    assert!(!h.store.is_pending());
    assert!(h.storage.is_empty());
    assert!(h.events.navigations().is_empty());
    assert_paired(&h.store);
}

#[tokio::test]
async fn login_failure_without_message_uses_generic_text() {
    let h = harness(MemoryStorage::new());
    h.transport.push(offline());

    let err = h.store.login(&credentials()).await.expect_err("must fail");

    assert!(matches!(err, SessionError::Api(ApiError::Transport(_))));
    assert_eq!(h.store.last_error().as_deref(), Some(crate::error::GENERIC_LOGIN_ERROR));
}

#[tokio::test]
async fn login_clears_previous_error_on_success() {
    let h = harness(MemoryStorage::new());
    h.transport.push(json(400, json!({"detail": "bad"})));
    h.transport.push(login_ok("tok-2", "admin"));

    let _ = h.store.login(&credentials()).await;
    assert_eq!(h.store.last_error().as_deref(), Some("bad"));

    h.store.login(&credentials()).await.expect("second login");
    assert_eq!(h.store.last_error(), None);
    assert!(h.store.is_admin());
}

#[tokio::test]
async fn login_marks_pending_while_outstanding() {
    let h = harness(MemoryStorage::new());
    h.transport.push(login_ok("tok-1", "admin"));

    h.store.login(&credentials()).await.expect("login");

    let changes = h.events.changes();
    let pending = changes.iter().find(|s| s.is_pending()).expect("pending snapshot");
    assert_eq!(pending.phase(), AuthPhase::Authenticating);
    assert_eq!(changes.last().map(Session::phase), Some(AuthPhase::Authenticated(Role::Admin)));
}

#[tokio::test]
async fn login_while_pending_is_rejected() {
    let h = harness(MemoryStorage::new());
    h.store.cell().update(|s| s.set_pending(true));

    let err = h.store.login(&credentials()).await.expect_err("must reject");

    assert!(matches!(err, SessionError::AuthenticationInProgress));
    assert!(h.transport.requests().is_empty());
    assert!(h.store.is_pending());
    assert_eq!(h.store.last_error(), None);
}

#[tokio::test]
async fn login_with_empty_token_fails() {
    let h = harness(MemoryStorage::new());
    h.transport.push(json(200, json!({"token": "", "user": {"id": 1, "rol": "admin"}})));

    let err = h.store.login(&credentials()).await.expect_err("must fail");

    assert!(matches!(err, SessionError::Api(ApiError::Decode(_))));
    assert!(!h.store.is_authenticated());
    assert_paired(&h.store);
}

#[tokio::test]
async fn login_storage_failure_keeps_session_empty() {
    let transport = ScriptedTransport::default();
    transport.push(login_ok("tok-1", "admin"));
    let storage = RejectingStorage { reject_key: TOKEN_KEY, ..RejectingStorage::default() };
    let store = SessionStore::hydrated(transport, ApiConfig::default(), storage, ());

    let err = store.login(&credentials()).await.expect_err("must fail");

    assert!(matches!(err, SessionError::Storage(_)));
    assert!(!store.is_authenticated());
    assert!(!store.is_pending());
    assert_eq!(store.last_error().as_deref(), Some(STORAGE_LOGIN_ERROR));
    assert!(store.storage().inner.is_empty());
}

#[tokio::test]
async fn relogin_storage_failure_keeps_previous_pair() {
    let transport = ScriptedTransport::default();
    transport.push(login_ok("tok-new", "docente"));
    let storage = RejectingStorage { reject_key: TOKEN_KEY, ..RejectingStorage::default() };
    storage.inner.write(TOKEN_KEY, "old").expect("write token");
    storage
        .inner
        .write(IDENTITY_KEY, &json!({"id": 7, "rol": "admin"}).to_string())
        .expect("write user");
    let store = SessionStore::hydrated(transport, ApiConfig::default(), storage, ());
    assert!(store.is_admin());

    let err = store.login(&credentials()).await.expect_err("must fail");

    assert!(matches!(err, SessionError::Storage(_)));
    assert!(store.is_admin());
    assert_eq!(store.snapshot().credential(), Some("old"));
    match crate::storage::load(store.storage()) {
        crate::storage::Persisted::Session { token, identity } => {
            assert_eq!(token, "old");
            assert_eq!(identity.id, 7);
            assert_eq!(identity.role, Role::Admin);
        }
        other => panic!("expected the previous pair, got {other:?}"),
    }
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_clears_state_storage_and_navigates() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "admin"})));

    h.store.logout().await;

    assert!(!h.store.is_authenticated());
    assert!(!h.store.is_pending());
    assert!(h.storage.is_empty());
    assert_eq!(h.events.navigations(), vec![AppRoute::Login]);
    assert_paired(&h.store);

    let request = h.transport.last_request();
    assert!(request.url.ends_with("/logout/"));
    assert_eq!(request.header("Authorization"), Some("Token abc"));
}

#[tokio::test]
async fn logout_completes_when_remote_call_fails() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "admin"})));
    h.transport.push(offline());

    h.store.logout().await;

    assert_eq!(h.store.snapshot().phase(), AuthPhase::Unauthenticated);
    assert!(h.storage.is_empty());
    assert_eq!(h.events.navigations(), vec![AppRoute::Login]);
}

#[tokio::test]
async fn logout_completes_on_server_error() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "admin"})));
    h.transport.push(json(500, json!({"detail": "boom"})));

    h.store.logout().await;

    assert!(!h.store.is_authenticated());
}

#[tokio::test]
async fn logout_twice_matches_logout_once() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "docente"})));

    h.store.logout().await;
    let once = h.store.snapshot();
    h.store.logout().await;

    assert_eq!(h.store.snapshot(), once);
    assert!(h.storage.is_empty());
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn logout_when_unauthenticated_skips_remote_call() {
    let h = harness(MemoryStorage::new());

    h.store.logout().await;
    h.store.logout().await;

    assert!(h.transport.requests().is_empty());
    assert!(!h.store.is_authenticated());
    assert_eq!(h.events.navigations(), vec![AppRoute::Login, AppRoute::Login]);
}

#[tokio::test]
async fn logout_during_login_leaves_login_pending() {
    let transport = ScriptedTransport::default().yielding();
    transport.push(login_ok("tok-1", "admin"));
    let store = SessionStore::hydrated(transport.clone(), ApiConfig::default(), MemoryStorage::new(), ());

    let first_credentials = credentials();
    let (first, (pending_after_logout, second)) = tokio::join!(store.login(&first_credentials), async {
        store.logout().await;
        let pending = store.is_pending();
        (pending, store.login(&credentials()).await)
    });

    assert!(pending_after_logout);
    assert!(matches!(second, Err(SessionError::AuthenticationInProgress)));
    assert_eq!(first.expect("first login").role, Role::Admin);
    assert_eq!(transport.requests().len(), 1);
    assert!(store.is_authenticated());
    assert!(!store.is_pending());
}

#[test]
fn expire_does_not_release_a_foreign_pending_flag() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "admin"})));
    h.store.cell().update(|s| s.set_pending(true));

    h.store.expire();

    assert!(!h.store.is_authenticated());
    assert!(h.store.is_pending());
}

#[tokio::test]
async fn logout_keeps_last_error() {
    let h = harness(MemoryStorage::new());
    h.transport.push(json(401, json!({"error": "invalid credentials"})));
    let _ = h.store.login(&credentials()).await;

    h.store.logout().await;

    assert_eq!(h.store.last_error().as_deref(), Some("invalid credentials"));
}

// =============================================================================
// expire / refresh_identity
// =============================================================================

#[test]
fn expire_tears_down_without_network() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "docente"})));

    h.store.expire();

    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
    assert!(h.transport.requests().is_empty());
    assert_eq!(h.events.navigations(), vec![AppRoute::Login]);
}

#[test]
fn expire_when_unauthenticated_is_silent() {
    let h = harness(MemoryStorage::new());
    h.store.expire();
    assert!(h.events.navigations().is_empty());
}

#[tokio::test]
async fn refresh_identity_replaces_role() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "docente"})));
    h.transport.push(json(200, json!({"id": 1, "username": "mlopez", "rol": "admin"})));

    let identity = h.store.refresh_identity().await.expect("refresh");

    assert_eq!(identity.role, Role::Admin);
    assert!(h.store.is_admin());
    assert_eq!(h.store.snapshot().credential(), Some("abc"));
    let stored = h.storage.read(IDENTITY_KEY).expect("stored identity");
    let stored: Identity = serde_json::from_str(&stored).expect("identity json");
    assert_eq!(stored.role, Role::Admin);
    assert!(h.transport.last_request().url.ends_with("/usuarios/me/"));
}

#[tokio::test]
async fn refresh_identity_unauthorized_expires_session() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "docente"})));
    h.transport.push(json(401, json!({"detail": "Invalid token."})));

    let err = h.store.refresh_identity().await.expect_err("must fail");

    assert_eq!(err.api().and_then(ApiError::status), Some(401));
    assert!(!h.store.is_authenticated());
    assert!(h.storage.is_empty());
    assert_eq!(h.events.navigations(), vec![AppRoute::Login]);
}

#[tokio::test]
async fn refresh_identity_other_failure_keeps_session() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "docente"})));
    h.transport.push(offline());

    assert!(h.store.refresh_identity().await.is_err());
    assert!(h.store.is_authenticated());
}

#[tokio::test]
async fn refresh_identity_requires_credential() {
    let h = harness(MemoryStorage::new());
    let err = h.store.refresh_identity().await.expect_err("must fail");
    assert!(matches!(err, SessionError::NotAuthenticated));
    assert!(h.transport.requests().is_empty());
}

#[test]
fn observe_expires_only_on_unauthorized() {
    let h = harness(persisted("abc", &json!({"id": 1, "rol": "docente"})));

    assert!(!h.store.observe(&ApiError::from_status(404, "")));
    assert!(h.store.is_authenticated());

    assert!(h.store.observe(&ApiError::from_status(401, "")));
    assert!(!h.store.is_authenticated());
    assert_eq!(h.events.navigations(), vec![AppRoute::Login]);
}

// =============================================================================
// Live credential
// =============================================================================

#[tokio::test]
async fn gateway_requests_follow_session_changes() {
    let h = harness(MemoryStorage::new());
    h.transport.push(login_ok("tok-9", "docente"));
    h.store.login(&credentials()).await.expect("login");

    h.transport.push(json(200, json!([])));
    h.store.gateway().my_reservations().await.expect("list");
    assert_eq!(h.transport.last_request().header("Authorization"), Some("Token tok-9"));

    h.store.expire();
    h.transport.push(json(200, json!([])));
    h.store.gateway().list_rooms(&[]).await.expect("list");
    assert_eq!(h.transport.last_request().header("Authorization"), None);
}
