//! Model Module
//!
//! The capability surface the store and dispatcher need from host models.
//!
//! ## Responsibilities
//! - Expose an identifier, its attribute name and the "is new" state
//! - Produce the full JSON form that gets persisted
//! - Say where the model is persisted (`Persistence`)
//!
//! `Record` and `Collection` are ready-made implementations for hosts that do
//! not bring their own model types.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::store::Store;

/// Default identifier attribute
pub const DEFAULT_ID_ATTRIBUTE: &str = "id";

/// Where a model's data lives
#[derive(Debug, Clone)]
pub enum Persistence {
    /// The model carries its own store
    Local(Arc<Store>),

    /// The model's parent collection carries the store
    Collection(Arc<Store>),

    /// No store anywhere; synced by the host's remote strategy
    Remote,
}

impl Persistence {
    /// The store to use, if the model is locally persisted at all
    pub fn store(&self) -> Option<&Arc<Store>> {
        match self {
            Persistence::Local(store) | Persistence::Collection(store) => Some(store),
            Persistence::Remote => None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.store().is_some()
    }
}

/// A host-framework model as seen by the store
pub trait Model {
    /// Identifier, stringified; `None` until the model has one
    fn id(&self) -> Option<String>;

    /// Name of the attribute holding the identifier
    fn id_attribute(&self) -> &str;

    /// Set an attribute. Setting `id_attribute()` must update `id()`.
    fn set(&mut self, attr: &str, value: Value);

    /// Whether `Store::create` should assign a generated id
    fn needs_id(&self) -> bool {
        self.id().is_none()
    }

    /// Whether the model has never been persisted
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Full JSON form, as persisted
    fn to_json(&self) -> Value;

    fn persistence(&self) -> Persistence {
        Persistence::Remote
    }
}

/// Stringify an identifier value. Null, empty and non-scalar ids count as absent.
fn stringify_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// =============================================================================
// Record
// =============================================================================

/// A JSON attribute bag implementing `Model`
#[derive(Debug, Clone, Default)]
pub struct Record {
    attributes: Map<String, Value>,
    id_attribute: Option<String>,
    store: Option<Arc<Store>>,
    collection: Option<Arc<Collection>>,
}

impl Record {
    /// Empty record with the default id attribute
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding `attributes`
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Use `attr` as the identifier attribute instead of `"id"`
    pub fn with_id_attribute(mut self, attr: impl Into<String>) -> Self {
        self.id_attribute = Some(attr.into());
        self
    }

    /// Persist this record through its own store
    pub fn with_store(mut self, store: Arc<Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Make this record a member of `collection`
    pub fn in_collection(mut self, collection: Arc<Collection>) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.attributes.get(attr)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn collection(&self) -> Option<&Arc<Collection>> {
        self.collection.as_ref()
    }
}

impl Model for Record {
    fn id(&self) -> Option<String> {
        self.attributes.get(self.id_attribute()).and_then(stringify_id)
    }

    // A numeric zero id is a placeholder, replaced on create.
    fn needs_id(&self) -> bool {
        match self.attributes.get(self.id_attribute()) {
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            _ => self.id().is_none(),
        }
    }

    fn id_attribute(&self) -> &str {
        match (&self.id_attribute, &self.collection) {
            (Some(attr), _) => attr.as_str(),
            (None, Some(collection)) => collection.model_id_attribute(),
            (None, None) => DEFAULT_ID_ATTRIBUTE,
        }
    }

    fn set(&mut self, attr: &str, value: Value) {
        self.attributes.insert(attr.to_string(), value);
    }

    fn to_json(&self) -> Value {
        Value::Object(self.attributes.clone())
    }

    fn persistence(&self) -> Persistence {
        if let Some(store) = &self.store {
            return Persistence::Local(Arc::clone(store));
        }
        match self.collection.as_ref().and_then(|c| c.store()) {
            Some(store) => Persistence::Collection(Arc::clone(store)),
            None => Persistence::Remote,
        }
    }
}

// =============================================================================
// Collection
// =============================================================================

/// A named group of records; syncing it with `read` fetches every record
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    store: Option<Arc<Store>>,
    model_id_attribute: String,
}

impl Collection {
    /// Collection persisted in `store`, named after it
    pub fn local(store: Arc<Store>) -> Self {
        Self {
            name: store.name().to_string(),
            store: Some(store),
            model_id_attribute: DEFAULT_ID_ATTRIBUTE.to_string(),
        }
    }

    /// Collection without a store (synced remotely)
    pub fn remote(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store: None,
            model_id_attribute: DEFAULT_ID_ATTRIBUTE.to_string(),
        }
    }

    /// Identifier attribute for records built by this collection
    pub fn with_model_id_attribute(mut self, attr: impl Into<String>) -> Self {
        self.model_id_attribute = attr.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> Option<&Arc<Store>> {
        self.store.as_ref()
    }

    pub fn model_id_attribute(&self) -> &str {
        &self.model_id_attribute
    }

    /// Build a member record from `attributes`
    pub fn record(self: &Arc<Self>, attributes: Map<String, Value>) -> Record {
        Record::from_attributes(attributes).in_collection(Arc::clone(self))
    }
}

impl Model for Collection {
    fn id(&self) -> Option<String> {
        None
    }

    fn id_attribute(&self) -> &str {
        &self.model_id_attribute
    }

    // Collections have no attributes of their own.
    fn set(&mut self, _attr: &str, _value: Value) {}

    fn to_json(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn persistence(&self) -> Persistence {
        match &self.store {
            Some(store) => Persistence::Local(Arc::clone(store)),
            None => Persistence::Remote,
        }
    }
}
