//! Tests for FileStorage
//!
//! These tests verify:
//! - Basic operations match MemoryStorage
//! - Every mutation survives a reopen
//! - Snapshot corruption is detected on open
//! - Quota failures leave both memory and disk untouched

use std::fs;
use std::path::{Path, PathBuf};

use localstore::config::Config;
use localstore::storage::{FileStorage, KeyValueStorage};
use localstore::StoreError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.db");
    (temp_dir, path)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_missing_file_starts_empty() {
    let (_temp, path) = setup_temp_file();

    let storage = FileStorage::open(&path, None).unwrap();

    assert!(storage.is_empty());
    assert!(!path.exists());
}

#[test]
fn test_open_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("store.db");

    let storage = FileStorage::open(&path, None).unwrap();
    storage.set_item("k", "v").unwrap();

    assert!(path.exists());
}

#[test]
fn test_from_config() {
    let (_temp, path) = setup_temp_file();
    let config = Config::builder().data_file(&path).quota_bytes(4).build().unwrap();

    let storage = FileStorage::from_config(&config).unwrap();

    assert_eq!(storage.path(), path.as_path());
    assert!(storage.set_item("key", "value").unwrap_err().is_quota_exceeded());
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_set_persists_across_reopen() {
    let (_temp, path) = setup_temp_file();

    {
        let storage = FileStorage::open(&path, None).unwrap();
        storage.set_item("todos", "a").unwrap();
        storage.set_item("todos-a", "{\"id\":\"a\"}").unwrap();
    }

    let storage = FileStorage::open(&path, None).unwrap();
    assert_eq!(storage.len(), 2);
    assert_eq!(storage.get_item("todos"), Some("a".to_string()));
    assert_eq!(storage.get_item("todos-a"), Some("{\"id\":\"a\"}".to_string()));
}

#[test]
fn test_remove_persists_across_reopen() {
    let (_temp, path) = setup_temp_file();

    {
        let storage = FileStorage::open(&path, None).unwrap();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.remove_item("a").unwrap();
    }

    let storage = FileStorage::open(&path, None).unwrap();
    assert_eq!(storage.get_item("a"), None);
    assert_eq!(storage.get_item("b"), Some("2".to_string()));
}

#[test]
fn test_remove_missing_key_does_not_write() {
    let (_temp, path) = setup_temp_file();

    let storage = FileStorage::open(&path, None).unwrap();
    storage.remove_item("ghost").unwrap();

    assert!(!path.exists());
}

#[test]
fn test_reopen_recomputes_usage() {
    let (_temp, path) = setup_temp_file();

    {
        let storage = FileStorage::open(&path, None).unwrap();
        storage.set_item("abc", "12345").unwrap();
    }

    let storage = FileStorage::open(&path, Some(10)).unwrap();
    assert_eq!(storage.used_bytes(), 8);
    assert!(storage.set_item("x", "yz").unwrap_err().is_quota_exceeded());
}

#[test]
fn test_quota_failure_leaves_disk_untouched() {
    let (_temp, path) = setup_temp_file();

    {
        let storage = FileStorage::open(&path, Some(10)).unwrap();
        storage.set_item("key", "value").unwrap();
        assert!(storage.set_item("big", "0123456789").is_err());
    }

    let storage = FileStorage::open(&path, Some(10)).unwrap();
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get_item("big"), None);
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_bad_magic_detected() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, b"NOPE-this-is-not-a-snapshot").unwrap();

    let err = FileStorage::open(&path, None).unwrap_err();

    assert!(matches!(err, StoreError::Corruption(_)));
}

#[test]
fn test_truncated_header_detected() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, b"LSKV").unwrap();

    let err = FileStorage::open(&path, None).unwrap_err();

    assert!(matches!(err, StoreError::Corruption(_)));
}

#[test]
fn test_flipped_payload_byte_detected() {
    let (_temp, path) = setup_temp_file();

    {
        let storage = FileStorage::open(&path, None).unwrap();
        storage.set_item("key", "value").unwrap();
    }

    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    let err = FileStorage::open(&path, None).unwrap_err();
    assert!(matches!(err, StoreError::Corruption(_)));
}

#[test]
fn test_truncated_payload_detected() {
    let (_temp, path) = setup_temp_file();

    {
        let storage = FileStorage::open(&path, None).unwrap();
        storage.set_item("key", "value").unwrap();
    }

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 2]).unwrap();

    let err = FileStorage::open(&path, None).unwrap_err();
    assert!(matches!(err, StoreError::Corruption(_)));
}

// =============================================================================
// Rollback Tests
// =============================================================================

/// Block the temp-file path with a directory so every flush fails
fn block_flush(path: &Path) {
    fs::create_dir(path.with_extension("tmp")).unwrap();
}

#[test]
fn test_failed_flush_rolls_back_set() {
    let (_temp, path) = setup_temp_file();
    let storage = FileStorage::open(&path, None).unwrap();
    storage.set_item("key", "old").unwrap();
    let used = storage.used_bytes();

    block_flush(&path);

    assert!(matches!(storage.set_item("key", "new value").unwrap_err(), StoreError::Io(_)));
    assert!(storage.set_item("fresh", "v").is_err());

    assert_eq!(storage.get_item("key"), Some("old".to_string()));
    assert_eq!(storage.get_item("fresh"), None);
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.used_bytes(), used);
}

#[test]
fn test_failed_flush_rolls_back_remove() {
    let (_temp, path) = setup_temp_file();
    let storage = FileStorage::open(&path, None).unwrap();
    storage.set_item("key", "value").unwrap();
    let used = storage.used_bytes();

    block_flush(&path);

    assert!(storage.remove_item("key").is_err());

    assert_eq!(storage.get_item("key"), Some("value".to_string()));
    assert_eq!(storage.used_bytes(), used);
}

#[test]
fn test_failed_flush_leaves_snapshot_intact() {
    let (_temp, path) = setup_temp_file();
    {
        let storage = FileStorage::open(&path, None).unwrap();
        storage.set_item("key", "value").unwrap();
        block_flush(&path);
        assert!(storage.set_item("key", "lost").is_err());
    }

    let storage = FileStorage::open(&path, None).unwrap();
    assert_eq!(storage.get_item("key"), Some("value".to_string()));
}
