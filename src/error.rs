//! Error taxonomy of the seeding subsystem.
//!
//! Compile-time problems are [`SpecError`]s. At run time a unit fails with a
//! [`UnitError`], and the orchestrator wraps every failure in a [`SeedError`]
//! carrying the id of the unit that failed.

use crate::model::LookupKey;
use crate::store::StoreError;

/// Malformed or inconsistent declarative source
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("cannot parse seed source: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("set '{name}' is declared more than once")]
    DuplicateSet { name: String },

    #[error("{kind} '{name}' must not contain ':'")]
    InvalidName { kind: &'static str, name: String },

    #[error("option '{key}' is defined more than once")]
    DuplicateOption { key: LookupKey },

    #[error("unresolved parent references: {}", format_pairs(.missing))]
    UnresolvedParents { missing: Vec<(LookupKey, LookupKey)> },

    #[error("parent references are cyclic or depend on a cycle: {}", format_keys(.options))]
    Cycle { options: Vec<LookupKey> },
}

/// A reference that could not be resolved through the identity map
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    #[error("option '{option}' references parent '{parent}' which was not created in this pass")]
    MissingParent { option: LookupKey, parent: LookupKey },

    #[error("option '{option}' belongs to set '{set}' which was not created in this pass")]
    MissingSet { option: LookupKey, set: LookupKey },
}

#[derive(Debug, thiserror::Error)]
#[error("write to '{collection}' failed: {source}")]
pub struct WriteError {
    pub collection: String,
    #[source]
    pub source: StoreError,
}

#[derive(Debug, thiserror::Error)]
#[error("seed ledger {operation} failed: {source}")]
pub struct LedgerError {
    pub operation: &'static str,
    #[source]
    pub source: StoreError,
}

/// Failure inside a single seed unit
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Orchestration failure, annotated with the unit that caused it
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to check if seed {unit_id} has run: {source}")]
    Check {
        unit_id: String,
        #[source]
        source: LedgerError,
    },

    #[error("seed {unit_id} failed: {source}")]
    Run {
        unit_id: String,
        #[source]
        source: UnitError,
    },

    #[error("failed to mark seed {unit_id} as run: {source}")]
    Mark {
        unit_id: String,
        #[source]
        source: LedgerError,
    },
}

impl SeedError {
    pub fn unit_id(&self) -> &str {
        match self {
            SeedError::Check { unit_id, .. }
            | SeedError::Run { unit_id, .. }
            | SeedError::Mark { unit_id, .. } => unit_id,
        }
    }
}

fn format_keys(keys: &[LookupKey]) -> String {
    keys.iter()
        .map(LookupKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_pairs(pairs: &[(LookupKey, LookupKey)]) -> String {
    pairs
        .iter()
        .map(|(option, parent)| format!("{} -> {}", option, parent))
        .collect::<Vec<_>>()
        .join(", ")
}
