//! Store Module
//!
//! Durable CRUD for one named collection of JSON records.
//!
//! ## Storage Layout
//! ```text
//! <name>        → "id1,id2,id3"          (id index, comma-joined, in insertion order)
//! <name>-<id>   → "{\"id\":\"id1\",...}"  (one JSON document per record)
//! ```
//!
//! ## Write Ordering
//! Mutations write the record first and the index second, as two separate
//! storage calls. An interruption between them leaves either an unindexed
//! record (invisible to `find_all`) or an indexed id with no record (filtered
//! out by `find_all`). Nothing is rolled back.

use std::fmt;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::guid::guid;
use crate::model::Model;
use crate::storage::SharedStorage;

/// Separator between ids in the index entry
const INDEX_SEPARATOR: &str = ",";

/// A named collection persisted in key-value storage
///
/// ## Concurrency:
/// - `records`: RwLock so every method takes `&self` and a store can be
///   shared (`Arc<Store>`) by models and collections
/// - The storage backend serializes its own operations
pub struct Store {
    /// Collection name: index key and record key prefix
    name: String,

    /// Ids of every persisted record, mirrored to the `name` entry
    records: RwLock<Vec<String>>,

    /// Underlying key-value primitive
    storage: SharedStorage,
}

impl Store {
    /// Open the collection `name`
    ///
    /// Fails with `StorageUnavailable` when there is no storage primitive.
    /// Otherwise loads the id index; an absent or empty index means no records.
    pub fn open(storage: Option<SharedStorage>, name: impl Into<String>) -> Result<Self> {
        let storage = storage.ok_or(StoreError::StorageUnavailable)?;
        let name = name.into();

        let records: Vec<String> = match storage.get_item(&name) {
            Some(index) if !index.is_empty() => {
                index.split(INDEX_SEPARATOR).map(str::to_string).collect()
            }
            _ => Vec::new(),
        };

        tracing::debug!(collection = %name, records = records.len(), "Opened store");

        Ok(Self {
            name,
            records: RwLock::new(records),
            storage,
        })
    }

    /// Write the id index back to storage
    pub fn save(&self) -> Result<()> {
        let index = self.records.read().join(INDEX_SEPARATOR);
        self.storage.set_item(&self.name, &index)
    }

    /// Persist a new model, assigning a generated id if it has none
    ///
    /// The id is appended to the index without a duplicate check.
    pub fn create(&self, model: &mut dyn Model) -> Result<Option<Value>> {
        if model.needs_id() {
            let id = guid();
            let attr = model.id_attribute().to_string();
            model.set(&attr, Value::String(id));
        }
        let id = self.require_id(model)?;

        self.write_record(&id, model)?;
        self.records.write().push(id.clone());
        self.save()?;

        tracing::debug!(collection = %self.name, id = %id, "Created record");
        self.find(model)
    }

    /// Overwrite a model's record, indexing it if it was not yet indexed
    pub fn update(&self, model: &dyn Model) -> Result<Option<Value>> {
        let id = self.require_id(model)?;

        self.write_record(&id, model)?;

        let newly_indexed = {
            let mut records = self.records.write();
            if records.contains(&id) {
                false
            } else {
                records.push(id.clone());
                true
            }
        };
        if newly_indexed {
            self.save()?;
        }

        tracing::debug!(collection = %self.name, id = %id, newly_indexed, "Updated record");
        self.find(model)
    }

    /// Load a model's record
    ///
    /// Returns `None` if the model has no id, nothing is stored, or the
    /// stored document is falsy (`null`, `false`, `0`, `""`).
    pub fn find(&self, model: &dyn Model) -> Result<Option<Value>> {
        let Some(id) = model.id() else {
            return Ok(None);
        };
        tracing::trace!(collection = %self.name, id = %id, "Finding record");
        self.read_record(&self.record_key(&id))
    }

    /// Load every indexed record, in index order, skipping missing and falsy ones
    pub fn find_all(&self) -> Result<Vec<Value>> {
        let keys: Vec<String> = self
            .records
            .read()
            .iter()
            .map(|id| self.record_key(id))
            .collect();

        let mut found = Vec::with_capacity(keys.len());
        for key in &keys {
            if let Some(value) = self.read_record(key)? {
                found.push(value);
            }
        }

        tracing::trace!(collection = %self.name, indexed = keys.len(), found = found.len(), "Found all records");
        Ok(found)
    }

    /// Remove a model's record and its index entry
    ///
    /// New models were never persisted: returns `None` without touching storage.
    /// Otherwise returns the model itself. Destroying an already removed model
    /// is harmless.
    pub fn destroy<'m>(&self, model: &'m dyn Model) -> Result<Option<&'m dyn Model>> {
        if model.is_new() {
            return Ok(None);
        }
        let id = self.require_id(model)?;

        self.storage.remove_item(&self.record_key(&id))?;
        self.records.write().retain(|existing| existing != &id);
        self.save()?;

        tracing::debug!(collection = %self.name, id = %id, "Destroyed record");
        Ok(Some(model))
    }

    /// Remove the index and every record of this collection
    ///
    /// Keys of other collections are left alone.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.name)?;

        let prefix = format!("{}-", self.name);
        for key in self.storage.keys() {
            if key.starts_with(&prefix) {
                self.storage.remove_item(&key)?;
            }
        }

        self.records.write().clear();
        tracing::debug!(collection = %self.name, "Cleared store");
        Ok(())
    }

    /// Total entries in the underlying storage (all collections)
    pub fn storage_size(&self) -> usize {
        self.storage.len()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the id index
    pub fn records(&self) -> Vec<String> {
        self.records.read().clone()
    }

    /// Storage key of the record with `id`
    pub fn record_key(&self, id: &str) -> String {
        format!("{}-{}", self.name, id)
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn require_id(&self, model: &dyn Model) -> Result<String> {
        model.id().ok_or_else(|| StoreError::MissingId {
            collection: self.name.clone(),
        })
    }

    fn write_record(&self, id: &str, model: &dyn Model) -> Result<()> {
        let json = model.to_json().to_string();
        self.storage.set_item(&self.record_key(id), &json)
    }

    fn read_record(&self, key: &str) -> Result<Option<Value>> {
        let text = match self.storage.get_item(key) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(None),
        };

        let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::MalformedRecord {
            key: key.to_string(),
            source,
        })?;

        Ok(if is_falsy(&value) { None } else { Some(value) })
    }
}

/// Documents that count as "nothing stored": `null`, `false`, zero and `""`
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.name)
            .field("records", &*self.records.read())
            .finish()
    }
}
