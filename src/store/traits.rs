use crate::model::Id;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field holding the surrogate id of every document
pub const ID_FIELD: &str = "_id";

pub type Document = Map<String, Value>;

/// Top-level field equality, all fields must match
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::new().eq(ID_FIELD, id)
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }

    /// Canonical JSON form; field order is stable
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone().into_iter().collect())
    }
}

/// Result of an upsert-if-absent: the id actually stored under the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: Id,
    pub inserted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document '{id}' already exists in '{collection}'")]
    Duplicate { collection: String, id: Id },

    #[error("document has no string '{}' field", ID_FIELD)]
    MissingId,

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}

pub fn document_id(document: &Document) -> Result<&str, StoreError> {
    document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingId)
}

/// Serializes a typed value into a store document
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// The three primitives seeding needs from a document store
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching `filter`, in insertion order
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    /// Inserts `document` only if nothing matches `filter`. Always reports the
    /// id stored under the filter, whether it was inserted now or existed.
    async fn upsert_if_absent(
        &self,
        collection: &str,
        filter: &Filter,
        document: Document,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Plain insert; an existing id is a [`StoreError::Duplicate`]
    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError>;
}
