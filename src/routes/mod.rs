//! Router assembly.

pub mod table;
pub use table::*;
