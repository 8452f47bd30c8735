//! Explorer routes. `/` lists tables; every other path goes through the table dispatcher.

use crate::handlers::{list_tables, method_not_allowed, table_request};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;

/// Bodies over `body_limit` are rejected inside the table handler so the reply keeps the error envelope.
pub fn explorer_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(list_tables).fallback(method_not_allowed))
        .fallback(table_request)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
