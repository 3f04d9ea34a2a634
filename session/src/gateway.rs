//! API gateway: the single egress point for remote calls.
//!
//! ARCHITECTURE
//! ============
//! Every operation funnels through [`Gateway::execute`], which runs a fixed
//! pipeline: build URL -> decorate -> send -> classify status. Decoration
//! reads the credential from the shared [`SessionCell`] at that moment, so a
//! request issued right after login or logout carries the current token, not
//! one captured when the gateway was built.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and non-2xx responses come back as [`ApiError`]
//! untouched. No retries, no business validation.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::state::SessionCell;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::{
    AvailabilityWindow, Credentials, Identity, LoginGrant, Reservation, ReservationDraft, Room,
    RoomDraft, Subject, SubjectDraft, UserDraft,
};

pub const LOGIN_PATH: &str = "login/";
pub const LOGOUT_PATH: &str = "logout/";
const CURRENT_USER_PATH: &str = "usuarios/me/";
const ROOMS_PATH: &str = "salones/";
const AVAILABLE_ROOMS_PATH: &str = "salones/disponibles/";
const RESERVATIONS_PATH: &str = "reservas/";
const MY_RESERVATIONS_PATH: &str = "reservas/mis_reservas/";
const SUBJECTS_PATH: &str = "asignaturas/";
const USERS_PATH: &str = "usuarios/";
const CREATE_INSTRUCTOR_PATH: &str = "usuarios/crear_docente/";

pub const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const ACCEPT: &str = "Accept";
const JSON_MIME: &str = "application/json";

/// True for the one endpoint that must never carry a credential.
#[must_use]
pub fn is_login_path(path: &str) -> bool {
    path.trim_matches('/') == LOGIN_PATH.trim_matches('/')
}

/// `Authorization` header value for a token.
#[must_use]
pub fn authorization_value(token: &str) -> String {
    format!("Token {token}")
}

fn detail_path(collection: &str, id: u64) -> String {
    format!("{collection}{id}/")
}

fn action_path(collection: &str, id: u64, action: &str) -> String {
    format!("{collection}{id}/{action}/")
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Transport adapter for the booking API.
pub struct Gateway<T> {
    transport: T,
    config: ApiConfig,
    session: SessionCell,
}

impl<T: Transport> Gateway<T> {
    #[must_use]
    pub fn new(transport: T, config: ApiConfig, session: SessionCell) -> Self {
        Self { transport, config, session }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the wire request for `path` without decoration.
    fn build(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> HttpRequest {
        let mut url = self.config.endpoint(path);
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish();
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&encoded);
        }

        let mut headers = vec![(ACCEPT.to_owned(), JSON_MIME.to_owned())];
        if body.is_some() {
            headers.push((CONTENT_TYPE.to_owned(), JSON_MIME.to_owned()));
        }
        HttpRequest { method, url, headers, body }
    }

    /// Attach the live bearer credential, except on the login call.
    fn decorate(&self, path: &str, mut request: HttpRequest) -> HttpRequest {
        if is_login_path(path) {
            return request;
        }
        if let Some(token) = self.session.credential() {
            request.headers.push((AUTHORIZATION.to_owned(), authorization_value(&token)));
        }
        request
    }

    /// Run the request pipeline and return the raw 2xx response.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] when no response arrived,
    /// [`ApiError::Status`] for any non-2xx status.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.decorate(path, self.build(method, path, query, body));
        tracing::debug!(method = method.as_str(), url = %request.url, "api request");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            tracing::debug!(status = response.status, path, "api request rejected");
            return Err(ApiError::from_status(response.status, &response.body));
        }
        Ok(response)
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<R, ApiError> {
        let response = self.execute(method, path, query, body).await?;
        decode(&response)
    }

    async fn discard(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.execute(method, path, &[], None).await.map(|_| ())
    }

    /// Generic escape hatch: any method, any path below the API base.
    ///
    /// An empty response body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors; [`ApiError::Decode`] when a
    /// non-empty body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let body = body.map(encode).transpose()?;
        let response = self.execute(method, path, query, body).await?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode(&response)
    }

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================

    /// Exchange credentials for a token. Never decorated.
    ///
    /// # Errors
    ///
    /// Returns the transport/status error unchanged; [`ApiError::Decode`] when
    /// the response lacks a usable token or user.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        let grant: LoginGrant = self
            .fetch(Method::Post, LOGIN_PATH, &[], Some(encode(credentials)?))
            .await?;
        if grant.token.trim().is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_owned()));
        }
        Ok(grant)
    }

    /// Invalidate the current token server-side.
    ///
    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.discard(Method::Post, LOGOUT_PATH).await
    }

    /// Fetch the identity behind the current token.
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn current_user(&self) -> Result<Identity, ApiError> {
        self.fetch(Method::Get, CURRENT_USER_PATH, &[], None).await
    }

    // =========================================================================
    // ROOMS
    // =========================================================================

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn list_rooms(&self, filters: &[(String, String)]) -> Result<Vec<Room>, ApiError> {
        self.fetch(Method::Get, ROOMS_PATH, filters, None).await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn room(&self, id: u64) -> Result<Room, ApiError> {
        self.fetch(Method::Get, &detail_path(ROOMS_PATH, id), &[], None).await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn create_room(&self, draft: &RoomDraft) -> Result<Room, ApiError> {
        self.fetch(Method::Post, ROOMS_PATH, &[], Some(encode(draft)?)).await
    }

    /// Partial update (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn update_room(&self, id: u64, draft: &RoomDraft) -> Result<Room, ApiError> {
        self.fetch(Method::Patch, &detail_path(ROOMS_PATH, id), &[], Some(encode(draft)?))
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn delete_room(&self, id: u64) -> Result<(), ApiError> {
        self.discard(Method::Delete, &detail_path(ROOMS_PATH, id)).await
    }

    /// Rooms free for the whole window. Availability is computed remotely.
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn available_rooms(&self, window: &AvailabilityWindow) -> Result<Vec<Room>, ApiError> {
        self.fetch(Method::Get, AVAILABLE_ROOMS_PATH, &window.query(), None).await
    }

    // =========================================================================
    // RESERVATIONS
    // =========================================================================

    /// All reservations visible to the caller, optionally for one room.
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn list_reservations(&self, room_id: Option<u64>) -> Result<Vec<Reservation>, ApiError> {
        let query: Vec<(String, String)> = room_id
            .map(|id| ("salon".to_owned(), id.to_string()))
            .into_iter()
            .collect();
        self.fetch(Method::Get, RESERVATIONS_PATH, &query, None).await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn my_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        self.fetch(Method::Get, MY_RESERVATIONS_PATH, &[], None).await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn create_reservation(&self, draft: &ReservationDraft) -> Result<Reservation, ApiError> {
        self.fetch(Method::Post, RESERVATIONS_PATH, &[], Some(encode(draft)?)).await
    }

    /// Partial update (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn update_reservation(
        &self,
        id: u64,
        draft: &ReservationDraft,
    ) -> Result<Reservation, ApiError> {
        self.fetch(
            Method::Patch,
            &detail_path(RESERVATIONS_PATH, id),
            &[],
            Some(encode(draft)?),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn cancel_reservation(&self, id: u64) -> Result<Reservation, ApiError> {
        self.fetch(Method::Post, &action_path(RESERVATIONS_PATH, id, "cancelar"), &[], None)
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn confirm_reservation(&self, id: u64) -> Result<Reservation, ApiError> {
        self.fetch(Method::Post, &action_path(RESERVATIONS_PATH, id, "confirmar"), &[], None)
            .await
    }

    // =========================================================================
    // SUBJECTS
    // =========================================================================

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.fetch(Method::Get, SUBJECTS_PATH, &[], None).await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn create_subject(&self, draft: &SubjectDraft) -> Result<Subject, ApiError> {
        self.fetch(Method::Post, SUBJECTS_PATH, &[], Some(encode(draft)?)).await
    }

    /// Full replacement (`PUT`).
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn update_subject(&self, id: u64, draft: &SubjectDraft) -> Result<Subject, ApiError> {
        self.fetch(Method::Put, &detail_path(SUBJECTS_PATH, id), &[], Some(encode(draft)?))
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn delete_subject(&self, id: u64) -> Result<(), ApiError> {
        self.discard(Method::Delete, &detail_path(SUBJECTS_PATH, id)).await
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn list_users(&self) -> Result<Vec<Identity>, ApiError> {
        self.fetch(Method::Get, USERS_PATH, &[], None).await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn user(&self, id: u64) -> Result<Identity, ApiError> {
        self.fetch(Method::Get, &detail_path(USERS_PATH, id), &[], None).await
    }

    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn create_user(&self, draft: &UserDraft) -> Result<Identity, ApiError> {
        self.fetch(Method::Post, USERS_PATH, &[], Some(encode(draft)?)).await
    }

    /// Create an account with the instructor role forced server-side.
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn create_instructor(&self, draft: &UserDraft) -> Result<Identity, ApiError> {
        self.fetch(Method::Post, CREATE_INSTRUCTOR_PATH, &[], Some(encode(draft)?)).await
    }

    /// Partial update (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns the transport/status/decode error unchanged.
    pub async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<Identity, ApiError> {
        self.fetch(Method::Patch, &detail_path(USERS_PATH, id), &[], Some(encode(draft)?))
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        self.discard(Method::Delete, &detail_path(USERS_PATH, id)).await
    }
}
