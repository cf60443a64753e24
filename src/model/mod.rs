pub mod common;
pub mod dictionary;
pub mod plan;
pub mod seed_record;
pub mod taxonomy;

pub use common::*;
pub use dictionary::*;
pub use plan::*;
pub use seed_record::*;
pub use taxonomy::*;
