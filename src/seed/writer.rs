use log::debug;

use crate::error::WriteError;
use crate::model::Id;
use crate::store::{Document, DocumentStore, Filter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Id of the document stored under the filter
    pub id: Id,
    pub inserted: bool,
}

/// Insert-only-if-absent over a natural-key filter.
///
/// The returned id is the persisted one. When a document already matches,
/// the candidate (and the id it carries) is discarded.
pub struct IdempotentWriter<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> IdempotentWriter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn write(
        &self,
        collection: &str,
        filter: &Filter,
        candidate: Document,
    ) -> Result<WriteOutcome, WriteError> {
        let outcome = self
            .store
            .upsert_if_absent(collection, filter, candidate)
            .await
            .map_err(|source| WriteError {
                collection: collection.to_string(),
                source,
            })?;

        debug!(
            "{} {} in {}",
            if outcome.inserted { "inserted" } else { "kept" },
            outcome.id,
            collection
        );

        Ok(WriteOutcome {
            id: outcome.id,
            inserted: outcome.inserted,
        })
    }
}
