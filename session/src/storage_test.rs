use super::*;
use crate::test_support::{RejectingStorage, identity};
use crate::types::Role;

#[test]
fn load_empty_storage() {
    assert_eq!(load(&MemoryStorage::new()), Persisted::Empty);
}

#[test]
fn save_then_load_round_trips() {
    let storage = MemoryStorage::new();
    let admin = identity(1, Role::Admin);
    save(&storage, "abc", &admin).unwrap();

    assert_eq!(storage.read(TOKEN_KEY).as_deref(), Some("abc"));
    assert_eq!(
        load(&storage),
        Persisted::Session { token: "abc".to_owned(), identity: admin }
    );
}

#[test]
fn save_writes_exact_serialized_identity() {
    let storage = MemoryStorage::new();
    let admin = identity(1, Role::Admin);
    save(&storage, "abc", &admin).unwrap();
    assert_eq!(storage.read(IDENTITY_KEY), Some(serde_json::to_string(&admin).unwrap()));
}

#[test]
fn load_token_without_identity_is_stale() {
    let storage = MemoryStorage::new();
    storage.write(TOKEN_KEY, "abc").unwrap();
    assert_eq!(load(&storage), Persisted::Stale);
}

#[test]
fn load_identity_without_token_is_stale() {
    let storage = MemoryStorage::new();
    storage.write(IDENTITY_KEY, r#"{"id":1,"rol":"admin"}"#).unwrap();
    assert_eq!(load(&storage), Persisted::Stale);
}

#[test]
fn load_corrupt_identity_is_stale() {
    let storage = MemoryStorage::new();
    storage.write(TOKEN_KEY, "abc").unwrap();
    storage.write(IDENTITY_KEY, "{not json").unwrap();
    assert_eq!(load(&storage), Persisted::Stale);
}

#[test]
fn load_null_identity_is_stale() {
    let storage = MemoryStorage::new();
    storage.write(TOKEN_KEY, "abc").unwrap();
    storage.write(IDENTITY_KEY, "null").unwrap();
    assert_eq!(load(&storage), Persisted::Stale);
}

#[test]
fn load_blank_token_is_stale() {
    let storage = MemoryStorage::new();
    storage.write(TOKEN_KEY, "  ").unwrap();
    storage.write(IDENTITY_KEY, r#"{"id":1}"#).unwrap();
    assert_eq!(load(&storage), Persisted::Stale);
}

#[test]
fn save_rolls_back_identity_when_token_write_fails() {
    let storage = RejectingStorage { reject_key: TOKEN_KEY, ..RejectingStorage::default() };
    let result = save(&storage, "abc", &identity(1, Role::Admin));
    assert!(matches!(result, Err(StorageError::Write { .. })));
    assert!(storage.inner.is_empty());
}

#[test]
fn save_restores_previous_pair_when_token_write_fails() {
    let storage = RejectingStorage { reject_key: TOKEN_KEY, ..RejectingStorage::default() };
    let old = identity(7, Role::Admin);
    storage.inner.write(TOKEN_KEY, "old").unwrap();
    storage.inner.write(IDENTITY_KEY, &serde_json::to_string(&old).unwrap()).unwrap();

    let result = save(&storage, "new", &identity(1, Role::Instructor));

    assert!(matches!(result, Err(StorageError::Write { .. })));
    assert_eq!(load(&storage), Persisted::Session { token: "old".to_owned(), identity: old });
}

#[test]
fn clear_removes_both_entries() {
    let storage = MemoryStorage::new();
    save(&storage, "abc", &identity(1, Role::Admin)).unwrap();
    clear(&storage).unwrap();
    assert!(storage.is_empty());
    assert_eq!(load(&storage), Persisted::Empty);
}
