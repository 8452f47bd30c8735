//! db-explorer server: connect, introspect the schema once, serve every table over HTTP.
//!
//! Run from repo root: `cargo run -p db-explorer-server`
//! Requires `DATABASE_URL` (environment or `.env`).

use db_explorer::{explorer_routes, load_catalog, AppState, Executor, MySqlExecutor, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("db_explorer=info,db_explorer_server=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let pool = sqlx::mysql::MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let executor = Arc::new(MySqlExecutor::new(pool));
    executor.ping().await?;
    let catalog = load_catalog(executor.as_ref()).await?;
    tracing::info!(tables = catalog.len(), "schema catalog loaded");

    let app = explorer_routes(AppState::new(executor, catalog), config.body_limit);
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("starting server at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
