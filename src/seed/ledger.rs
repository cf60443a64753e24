//! Migration ledger: at-most-once application of named seed units.

use log::{info, warn};

use crate::error::{LedgerError, SeedError, UnitError};
use crate::model::{MissingParentPolicy, SeedPlan, SeedRecord, SEEDS_COLLECTION};
use crate::seed::executor::{apply_plan, ApplyReport};
use crate::seed::identity::IdentityMap;
use crate::store::{to_document, DocumentStore, Filter};

/// One named, idempotent batch of bootstrap writes
#[async_trait::async_trait]
pub trait SeedUnit: Send + Sync {
    fn id(&self) -> &str;
    fn description(&self) -> &str;

    /// Runs the unit. `ids` is fresh for every run and scoped to this unit.
    async fn run(&self, store: &dyn DocumentStore, ids: &mut IdentityMap) -> Result<ApplyReport, UnitError>;
}

/// Seed unit backed by a compiled [`SeedPlan`]
#[derive(Debug, Clone)]
pub struct PlanSeed {
    id: String,
    description: String,
    plan: SeedPlan,
    missing_parent: MissingParentPolicy,
}

impl PlanSeed {
    pub fn new(id: impl Into<String>, description: impl Into<String>, plan: SeedPlan) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            plan,
            missing_parent: MissingParentPolicy::Fail,
        }
    }

    pub fn with_missing_parent(mut self, policy: MissingParentPolicy) -> Self {
        self.missing_parent = policy;
        self
    }

    pub fn plan(&self) -> &SeedPlan {
        &self.plan
    }
}

#[async_trait::async_trait]
impl SeedUnit for PlanSeed {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, store: &dyn DocumentStore, ids: &mut IdentityMap) -> Result<ApplyReport, UnitError> {
        apply_plan(store, &self.plan, ids, self.missing_parent).await
    }
}

/// Tracks which seeds have been applied
#[async_trait::async_trait]
pub trait SeedTracker: Send + Sync {
    async fn has_run(&self, id: &str) -> Result<bool, LedgerError>;
    async fn mark_run(&self, record: SeedRecord) -> Result<(), LedgerError>;
}

/// Ledger kept in the `_seeds` collection of a document store
pub struct StoreSeedTracker<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> StoreSeedTracker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'a, S: DocumentStore + ?Sized> SeedTracker for StoreSeedTracker<'a, S> {
    async fn has_run(&self, id: &str) -> Result<bool, LedgerError> {
        let record = self
            .store
            .find_one(SEEDS_COLLECTION, &Filter::by_id(id))
            .await
            .map_err(|source| LedgerError {
                operation: "lookup",
                source,
            })?;
        Ok(record.is_some())
    }

    async fn mark_run(&self, record: SeedRecord) -> Result<(), LedgerError> {
        let document = to_document(&record).map_err(|source| LedgerError {
            operation: "record",
            source,
        })?;

        match self.store.insert(SEEDS_COLLECTION, document).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_duplicate() => {
                warn!("seed {} was recorded concurrently by another process", record.id);
                Ok(())
            }
            Err(source) => Err(LedgerError {
                operation: "record",
                source,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

/// Applies every seed that has not run yet, in list order.
///
/// The first failure aborts the whole run and no record is written for the
/// failing unit, so it is attempted again on the next invocation.
pub async fn apply_seeds<T: SeedTracker + ?Sized>(
    store: &dyn DocumentStore,
    tracker: &T,
    seeds: &[Box<dyn SeedUnit>],
    application: &str,
) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    for seed in seeds {
        let unit_id = seed.id();

        let already_run = tracker.has_run(unit_id).await.map_err(|source| SeedError::Check {
            unit_id: unit_id.to_string(),
            source,
        })?;

        if already_run {
            info!("seed {} already applied, skipping", unit_id);
            summary.skipped.push(unit_id.to_string());
            continue;
        }

        let mut ids = IdentityMap::new();
        let report = seed.run(store, &mut ids).await.map_err(|source| SeedError::Run {
            unit_id: unit_id.to_string(),
            source,
        })?;

        tracker
            .mark_run(SeedRecord::new(unit_id, application, seed.description()))
            .await
            .map_err(|source| SeedError::Mark {
                unit_id: unit_id.to_string(),
                source,
            })?;

        info!(
            "seed {} applied: {} inserted, {} already present",
            unit_id, report.inserted, report.existing
        );
        summary.applied.push(unit_id.to_string());
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSeed {
        id: &'static str,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl SeedUnit for CountingSeed {
        fn id(&self) -> &str {
            self.id
        }

        fn description(&self) -> &str {
            "counting seed"
        }

        async fn run(&self, _store: &dyn DocumentStore, _ids: &mut IdentityMap) -> Result<ApplyReport, UnitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(UnitError::Other(anyhow::anyhow!("boom")));
            }
            Ok(ApplyReport::default())
        }
    }

    fn counting(id: &'static str, fail: bool) -> (Box<dyn SeedUnit>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seed = CountingSeed {
            id,
            calls: calls.clone(),
            fail,
        };
        (Box::new(seed), calls)
    }

    #[tokio::test]
    async fn test_applied_seed_is_not_run_again() {
        let store = MemoryStore::new();
        let tracker = StoreSeedTracker::new(&store);
        let (seed, calls) = counting("2025-10-30_unit", false);
        let seeds = vec![seed];

        let first = apply_seeds(&store, &tracker, &seeds, "dictionary").await.unwrap();
        let second = apply_seeds(&store, &tracker, &seeds, "dictionary").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.applied, vec!["2025-10-30_unit"]);
        assert_eq!(second.skipped, vec!["2025-10-30_unit"]);
        assert_eq!(store.count(SEEDS_COLLECTION), 1);

        let record = store.documents(SEEDS_COLLECTION).remove(0);
        assert_eq!(record["_id"], "2025-10-30_unit");
        assert_eq!(record["application"], "dictionary");
        assert_eq!(record["description"], "counting seed");
    }

    #[tokio::test]
    async fn test_failure_aborts_and_leaves_unit_unrecorded() {
        let store = MemoryStore::new();
        let tracker = StoreSeedTracker::new(&store);
        let (first, first_calls) = counting("unit-1", false);
        let (failing, failing_calls) = counting("unit-2", true);
        let (last, last_calls) = counting("unit-3", false);
        let seeds = vec![first, failing, last];

        let err = apply_seeds(&store, &tracker, &seeds, "dictionary").await.unwrap_err();

        assert_eq!(err.unit_id(), "unit-2");
        assert!(matches!(err, SeedError::Run { .. }));
        assert!(err.to_string().contains("seed unit-2 failed"));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(last_calls.load(Ordering::SeqCst), 0);
        assert!(tracker.has_run("unit-1").await.unwrap());
        assert!(!tracker.has_run("unit-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_mark_run_is_tolerated() {
        let store = MemoryStore::new();
        let tracker = StoreSeedTracker::new(&store);

        tracker.mark_run(SeedRecord::new("unit", "a", "first")).await.unwrap();
        tracker.mark_run(SeedRecord::new("unit", "b", "second")).await.unwrap();

        let records = store.documents(SEEDS_COLLECTION);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["application"], "a");
    }
}
