//! HTTP handlers for the table listing and per-table operations.

pub mod table;
pub use table::*;
