pub mod catalog;
pub mod executor;
pub mod generated;
pub mod identity;
pub mod ledger;
pub mod writer;

pub use catalog::*;
pub use executor::*;
pub use identity::*;
pub use ledger::*;
pub use writer::*;
