use parking_lot::RwLock;
use std::collections::HashMap;

use crate::store::traits::{document_id, Document, DocumentStore, Filter, StoreError, UpsertOutcome};

/// In-process document store.
///
/// Each primitive holds the write lock for its whole duration, so an
/// upsert-if-absent is atomic with respect to concurrent callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, |docs| docs.len())
    }

    /// Snapshot of a collection in insertion order
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert_if_absent(
        &self,
        collection: &str,
        filter: &Filter,
        document: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        let id = document_id(&document)?.to_string();
        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.iter().find(|doc| filter.matches(doc)) {
            return Ok(UpsertOutcome {
                id: document_id(existing)?.to_string(),
                inserted: false,
            });
        }

        if docs.iter().any(|doc| document_id(doc).ok() == Some(id.as_str())) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            });
        }

        docs.push(document);
        Ok(UpsertOutcome { id, inserted: true })
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let id = document_id(&document)?.to_string();
        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.iter().any(|doc| document_id(doc).ok() == Some(id.as_str())) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            });
        }

        docs.push(document);
        Ok(())
    }
}
