//! Schema catalog: tables and column metadata discovered once at startup.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
