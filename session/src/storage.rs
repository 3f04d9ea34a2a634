//! Durable client storage for the credential and identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two entries survive a restart: `token` (raw bearer string) and `user`
//! (serialized identity). They are written together on login and removed
//! together on logout. The backing store is environment specific
//! (`localStorage` in the browser, a JSON file for the CLI), so it sits
//! behind [`SessionStorage`].
//!
//! TRADE-OFFS
//! ==========
//! Key/value stores offer no multi-key transaction. [`save`] writes the token
//! last and rolls back the identity if that write fails; [`load`] only
//! accepts the pair when both entries parse, so a half-written pair can never
//! hydrate into an authenticated session.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::StorageError;
use crate::types::Identity;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-serialized identity.
pub const IDENTITY_KEY: &str = "user";

/// Minimal string key/value store.
pub trait SessionStorage {
    /// Read an entry. Unreadable entries are reported as absent.
    fn read(&self, key: &str) -> Option<String>;

    /// Write an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove an entry. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Outcome of reading the persisted pair.
#[derive(Debug, PartialEq, Eq)]
pub enum Persisted {
    /// Both entries present and valid.
    Session { token: String, identity: Identity },
    /// Nothing stored.
    Empty,
    /// Entries present but unusable (missing half, blank token, bad JSON).
    Stale,
}

/// Read the persisted credential and identity.
pub fn load(storage: &impl SessionStorage) -> Persisted {
    let token = storage.read(TOKEN_KEY);
    let raw_identity = storage.read(IDENTITY_KEY);

    match (token, raw_identity) {
        (None, None) => Persisted::Empty,
        (Some(token), Some(raw)) if !token.trim().is_empty() => {
            match serde_json::from_str::<Option<Identity>>(&raw) {
                Ok(Some(identity)) => Persisted::Session { token, identity },
                Ok(None) | Err(_) => Persisted::Stale,
            }
        }
        _ => Persisted::Stale,
    }
}

/// Persist the credential and identity as a pair.
///
/// # Errors
///
/// Returns [`StorageError`] when either write fails; in that case the
/// previously stored pair is put back (best effort).
pub fn save(
    storage: &impl SessionStorage,
    token: &str,
    identity: &Identity,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(identity)?;
    let previous = storage.read(IDENTITY_KEY);
    storage.write(IDENTITY_KEY, &raw)?;
    if let Err(err) = storage.write(TOKEN_KEY, token) {
        restore(storage, IDENTITY_KEY, previous.as_deref());
        return Err(err);
    }
    Ok(())
}

fn restore(storage: &impl SessionStorage, key: &str, previous: Option<&str>) {
    let result = match previous {
        Some(value) => storage.write(key, value),
        None => storage.remove(key),
    };
    if let Err(err) = result {
        tracing::warn!(key, error = %err, "failed to roll back session storage");
    }
}

/// Remove both entries.
///
/// # Errors
///
/// Returns the first [`StorageError`]; the second removal is still attempted.
pub fn clear(storage: &impl SessionStorage) -> Result<(), StorageError> {
    let token = storage.remove(TOKEN_KEY);
    let identity = storage.remove(IDENTITY_KEY);
    token.and(identity)
}

/// Process-local storage. Used by tests and by ephemeral CLI runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
