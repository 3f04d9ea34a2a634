//! Session and authorization core for the GECOS room-booking client.
//!
//! This crate owns everything both the browser client and the CLI need to
//! agree on: the token-backed [`Session`], the [`Gateway`] that every remote
//! call goes through, and the route [`guard`] that decides whether a screen
//! transition is admitted.
//!
//! ARCHITECTURE
//! ============
//! The core is target independent. The two environment seams are traits:
//! [`Transport`] (how bytes reach the API) and [`SessionStorage`] (where the
//! token and identity survive a restart). Navigation and change notification
//! flow out through [`SessionEvents`]. `client` plugs in `gloo-net` and
//! `localStorage`; `cli` plugs in `reqwest` and a JSON file.

pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::{ApiError, ConfigError, SessionError, StorageError, TransportError};
pub use gateway::Gateway;
pub use guard::{Admission, RouteIntent, admit};
pub use routes::AppRoute;
pub use state::{AuthPhase, Session, SessionCell};
pub use storage::{MemoryStorage, SessionStorage};
pub use store::{SessionEvents, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
pub use types::{Credentials, Identity, LoginGrant, Role};
