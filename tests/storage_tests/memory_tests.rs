//! Tests for MemoryStorage
//!
//! These tests verify:
//! - get/set/remove semantics
//! - Entry count and key enumeration
//! - Quota enforcement (including the zero-quota private mode)

use localstore::error::QUOTA_EXCEEDED_ERR;
use localstore::storage::{KeyValueStorage, MemoryStorage};
use localstore::StoreError;

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_storage_is_empty() {
    let storage = MemoryStorage::new();

    assert_eq!(storage.len(), 0);
    assert!(storage.is_empty());
    assert!(storage.keys().is_empty());
}

#[test]
fn test_set_and_get() {
    let storage = MemoryStorage::new();

    storage.set_item("todos", "a,b").unwrap();

    assert_eq!(storage.get_item("todos"), Some("a,b".to_string()));
    assert_eq!(storage.len(), 1);
}

#[test]
fn test_get_missing_key() {
    let storage = MemoryStorage::new();

    assert_eq!(storage.get_item("nope"), None);
}

#[test]
fn test_set_overwrites() {
    let storage = MemoryStorage::new();

    storage.set_item("k", "v1").unwrap();
    storage.set_item("k", "v2").unwrap();

    assert_eq!(storage.get_item("k"), Some("v2".to_string()));
    assert_eq!(storage.len(), 1);
}

#[test]
fn test_remove_item() {
    let storage = MemoryStorage::new();

    storage.set_item("k", "v").unwrap();
    storage.remove_item("k").unwrap();

    assert_eq!(storage.get_item("k"), None);
    assert!(storage.is_empty());
}

#[test]
fn test_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();

    storage.remove_item("ghost").unwrap();

    assert!(storage.is_empty());
}

#[test]
fn test_keys_enumerates_everything() {
    let storage = MemoryStorage::new();

    storage.set_item("b", "2").unwrap();
    storage.set_item("a", "1").unwrap();

    let mut keys = storage.keys();
    keys.sort();
    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
}

// =============================================================================
// Quota Tests
// =============================================================================

#[test]
fn test_used_bytes_tracks_keys_and_values() {
    let storage = MemoryStorage::new();

    storage.set_item("abc", "12345").unwrap();
    assert_eq!(storage.used_bytes(), 8);

    storage.set_item("abc", "1").unwrap();
    assert_eq!(storage.used_bytes(), 4);

    storage.remove_item("abc").unwrap();
    assert_eq!(storage.used_bytes(), 0);
}

#[test]
fn test_write_within_quota() {
    let storage = MemoryStorage::with_quota(10);

    storage.set_item("key", "value").unwrap();

    assert_eq!(storage.used_bytes(), 8);
}

#[test]
fn test_write_over_quota_fails_without_side_effects() {
    let storage = MemoryStorage::with_quota(10);
    storage.set_item("key", "value").unwrap();

    let err = storage.set_item("other", "too long").unwrap_err();

    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    assert_eq!(err.code(), Some(QUOTA_EXCEEDED_ERR));
    assert_eq!(storage.get_item("other"), None);
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.used_bytes(), 8);
}

#[test]
fn test_overwrite_counts_only_difference() {
    let storage = MemoryStorage::with_quota(10);
    storage.set_item("key", "value").unwrap();

    // 3 + 7 = 10, exactly at the limit once the old value is released
    storage.set_item("key", "longer!").unwrap();

    assert_eq!(storage.used_bytes(), 10);
}

#[test]
fn test_zero_quota_rejects_everything() {
    let storage = MemoryStorage::with_quota(0);

    let err = storage.set_item("k", "").unwrap_err();

    assert!(err.is_quota_exceeded());
    assert!(storage.is_empty());
}
