//! DB explorer: every table of a live database behind one generic REST interface.

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod mapper;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use catalog::{load_catalog, Column, ColumnMeta, SchemaCatalog, TableSchema};
pub use error::{AppError, ConfigError};
pub use executor::{Cell, ExecOutcome, Executor};
pub use routes::explorer_routes;
pub use service::CrudService;
pub use settings::ServerConfig;
pub use state::AppState;
pub use store::MySqlExecutor;
