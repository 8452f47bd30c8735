//! Shared application state for all routes. Built once at startup, never mutated.

use crate::catalog::SchemaCatalog;
use crate::executor::Executor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<dyn Executor>,
    pub catalog: Arc<SchemaCatalog>,
}

impl AppState {
    pub fn new(executor: Arc<dyn Executor>, catalog: SchemaCatalog) -> Self {
        AppState {
            executor,
            catalog: Arc::new(catalog),
        }
    }
}
