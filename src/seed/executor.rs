//! Runs the operations of one [`SeedPlan`] against a document store.

use log::{debug, warn};

use crate::error::{ResolutionError, UnitError, WriteError};
use crate::model::{
    generate_id, Audit, DictionaryOption, DictionarySet, MissingParentPolicy, OptionOp, SeedOperation,
    SeedPlan, SetOp, OPTIONS_COLLECTION, SETS_COLLECTION,
};
use crate::seed::identity::IdentityMap;
use crate::seed::writer::{IdempotentWriter, WriteOutcome};
use crate::store::{to_document, Document, DocumentStore, Filter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub inserted: usize,
    pub existing: usize,
}

impl ApplyReport {
    fn record(&mut self, outcome: &WriteOutcome) {
        if outcome.inserted {
            self.inserted += 1;
        } else {
            self.existing += 1;
        }
    }
}

/// Applies `plan` in order, registering every persisted id in `ids`.
///
/// Stops at the first failure; earlier writes stay in the store.
pub async fn apply_plan<S: DocumentStore + ?Sized>(
    store: &S,
    plan: &SeedPlan,
    ids: &mut IdentityMap,
    missing_parent: MissingParentPolicy,
) -> Result<ApplyReport, UnitError> {
    let writer = IdempotentWriter::new(store);
    let mut report = ApplyReport::default();

    for operation in plan.operations() {
        let outcome = match operation {
            SeedOperation::UpsertSet(set) => write_set(&writer, set).await?,
            SeedOperation::UpsertOption(option) => write_option(&writer, option, ids, missing_parent).await?,
        };
        report.record(&outcome);
        ids.insert(operation.lookup_key(), outcome.id);
    }

    debug!(
        "applied {} operations ({} inserted, {} already present)",
        plan.len(),
        report.inserted,
        report.existing
    );
    Ok(report)
}

async fn write_set<S: DocumentStore + ?Sized>(
    writer: &IdempotentWriter<'_, S>,
    set: &SetOp,
) -> Result<WriteOutcome, UnitError> {
    let filter = Filter::new()
        .eq("name", set.name.as_str())
        .eq("locale", set.locale.as_str());

    let candidate = DictionarySet {
        id: generate_id(),
        name: set.name.clone(),
        locale: set.locale.clone(),
        label: set.label.clone(),
        description: set.description.clone(),
        active: set.active,
        audit: Audit::system(),
    };

    Ok(writer.write(SETS_COLLECTION, &filter, serialize(SETS_COLLECTION, &candidate)?).await?)
}

async fn write_option<S: DocumentStore + ?Sized>(
    writer: &IdempotentWriter<'_, S>,
    option: &OptionOp,
    ids: &IdentityMap,
    missing_parent: MissingParentPolicy,
) -> Result<WriteOutcome, UnitError> {
    let set_key = option.set_lookup_key();
    let set_id = ids
        .resolve(&set_key)
        .cloned()
        .ok_or_else(|| ResolutionError::MissingSet {
            option: option.lookup_key(),
            set: set_key,
        })?;

    let parent_id = match &option.parent {
        None => None,
        Some(parent) => match (ids.resolve(parent), missing_parent) {
            (Some(id), _) => Some(id.clone()),
            (None, MissingParentPolicy::TreatAsRoot) => {
                warn!(
                    "parent {} of option {} not found, storing it at root level",
                    parent,
                    option.lookup_key()
                );
                None
            }
            (None, MissingParentPolicy::Fail) => {
                return Err(ResolutionError::MissingParent {
                    option: option.lookup_key(),
                    parent: parent.clone(),
                }
                .into())
            }
        },
    };

    let filter = Filter::new()
        .eq("set_id", set_id.as_str())
        .eq("key", option.key.as_str())
        .eq("locale", option.locale.as_str());

    let candidate = DictionaryOption {
        id: generate_id(),
        set_id,
        parent_id,
        locale: option.locale.clone(),
        short_code: option.short_code.clone(),
        key: option.key.clone(),
        label: option.label.clone(),
        description: option.description.clone(),
        value: option.value.clone(),
        order: option.order,
        active: option.active,
        audit: Audit::system(),
    };

    Ok(writer.write(OPTIONS_COLLECTION, &filter, serialize(OPTIONS_COLLECTION, &candidate)?).await?)
}

fn serialize<T: serde::Serialize>(collection: &str, value: &T) -> Result<Document, WriteError> {
    to_document(value).map_err(|source| WriteError {
        collection: collection.to_string(),
        source,
    })
}
