pub mod codegen;
pub mod compile;
pub mod partition;

pub use codegen::*;
pub use compile::*;
pub use partition::*;
