//! File-backed storage
//!
//! Keeps the whole map in memory and rewrites the snapshot on every mutation.
//! The snapshot is replaced atomically (write temp file, fsync, rename), so a
//! crash leaves either the old or the new image on disk, never a torn one.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{Result, StoreError};

use super::entries::Entries;
use super::KeyValueStorage;

/// Magic bytes identifying a localstore snapshot
const MAGIC: &[u8; 4] = b"LSKV";

/// Current snapshot format version
const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadLen (8) + PayloadCRC (4) = 18 bytes
const HEADER_SIZE: usize = 18;

/// Durable key-value storage mirrored to a single snapshot file
#[derive(Debug)]
pub struct FileStorage {
    /// Snapshot path
    path: PathBuf,

    /// In-memory image; the write lock is held across the flush
    entries: RwLock<Entries>,
}

impl FileStorage {
    /// Open or create storage at `path`
    ///
    /// On open:
    /// 1. Create the parent directory if needed
    /// 2. Load and verify the snapshot if it exists
    /// 3. Start empty otherwise (the file is written on first mutation)
    pub fn open(path: impl AsRef<Path>, quota: Option<usize>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let map = Self::load(&path)?;
            tracing::info!(path = %path.display(), entries = map.len(), "Loaded storage snapshot");
            Entries::from_map(map, quota)
        } else {
            tracing::debug!(path = %path.display(), "No snapshot found, starting empty");
            Entries::new(quota)
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Open using the data file and quota from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open(&config.data_file, config.quota_bytes)
    }

    /// Snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes currently used (keys + values)
    pub fn used_bytes(&self) -> usize {
        self.entries.read().used()
    }

    // =========================================================================
    // Snapshot I/O
    // =========================================================================

    fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        let mut file = File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        if bytes.len() < HEADER_SIZE {
            return Err(StoreError::Corruption(format!(
                "Incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        if &bytes[0..4] != MAGIC {
            return Err(StoreError::Corruption(format!(
                "Invalid snapshot magic: expected LSKV, got {:?}",
                &bytes[0..4]
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(StoreError::Corruption(format!(
                "Unsupported snapshot version: {}",
                version
            )));
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&bytes[6..14]);
        let payload_len = u64::from_le_bytes(len_bytes) as usize;

        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&bytes[14..18]);
        let expected_crc = u32::from_le_bytes(crc_bytes);

        let payload = &bytes[HEADER_SIZE..];
        if payload.len() != payload_len {
            return Err(StoreError::Corruption(format!(
                "Payload length mismatch: header says {}, file has {}",
                payload_len,
                payload.len()
            )));
        }

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(StoreError::Corruption(format!(
                "CRC mismatch: expected {:08x}, got {:08x}",
                expected_crc, actual_crc
            )));
        }

        bincode::deserialize(payload).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        let payload =
            bincode::serialize(entries.map()).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let crc = crc32fast::hash(&payload);

        let tmp_path = self.path.with_extension("tmp");
        {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)?;
            let mut writer = BufWriter::new(file);

            writer.write_all(MAGIC)?;
            writer.write_all(&VERSION.to_le_bytes())?;
            writer.write_all(&(payload.len() as u64).to_le_bytes())?;
            writer.write_all(&crc.to_le_bytes())?;
            writer.write_all(&payload)?;
            writer.flush()?;

            let file = writer
                .into_inner()
                .map_err(|e| StoreError::Io(e.into_error()))?;
            file.sync_all()?;
        }

        fs::rename(&tmp_path, &self.path)?;
        tracing::trace!(path = %self.path.display(), bytes = payload.len(), "Snapshot flushed");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let previous = entries.insert(key, value)?;

        if let Err(e) = self.persist(&entries) {
            entries.restore(key, previous);
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&entries) {
            entries.restore(key, Some(previous));
            return Err(e);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys()
    }
}
