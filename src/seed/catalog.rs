//! Seed units shipped with this crate, in application order.

use crate::model::MissingParentPolicy;
use crate::seed::generated;
use crate::seed::ledger::{PlanSeed, SeedUnit};

pub const REAL_ESTATE_DICTIONARY_SEED: &str = "2025-10-30_real_estate_dictionary";

/// Every known seed unit. New units are appended; ids are never reused.
pub fn dictionary_seeds(missing_parent: MissingParentPolicy) -> Vec<Box<dyn SeedUnit>> {
    vec![Box::new(
        PlanSeed::new(
            REAL_ESTATE_DICTIONARY_SEED,
            "Load real estate dictionary (excluding geographic data)",
            generated::real_estate_dictionary(),
        )
        .with_missing_parent(missing_parent),
    )]
}
