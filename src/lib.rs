pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

pub use error::{LedgerError, ResolutionError, SeedError, SpecError, UnitError, WriteError};

pub use logic::codegen::{render_plan, RenderOptions};
pub use logic::compile::{compile, compile_json, Compilation, CompileOptions};
pub use logic::partition::OrderingStrategy;

// Export all model types
pub use model::*;

pub use seed::{
    apply_plan, apply_seeds, dictionary_seeds, ApplyReport, IdempotentWriter, IdentityMap, PlanSeed,
    SeedSummary, SeedTracker, SeedUnit, StoreSeedTracker,
};

// Export store types
pub use store::{DocumentStore, Filter, MemoryStore, PostgresStore, StoreError};
