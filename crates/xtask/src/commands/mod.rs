//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalog;
mod convert;
mod inspect;

pub use catalog::Catalog;
pub use convert::Convert;
pub use inspect::Inspect;
