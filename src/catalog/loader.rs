//! Build the catalog from live introspection queries.

use crate::catalog::types::{Column, SchemaCatalog, TableSchema};
use crate::error::AppError;
use crate::executor::Executor;

/// Enumerate tables, then describe each one. Any failing query fails the whole load.
pub async fn load_catalog(executor: &dyn Executor) -> Result<SchemaCatalog, AppError> {
    let names = executor.list_tables().await?;
    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let columns: Vec<Column> = executor
            .describe_columns(&name)
            .await?
            .into_iter()
            .map(Column::from)
            .collect();
        let table = TableSchema::new(name, columns);
        match table.primary_key() {
            Ok(pk) => tracing::info!(table = %table.name, columns = table.columns.len(), primary_key = %pk.name, "table loaded"),
            Err(e) => tracing::warn!(table = %table.name, "{}; only list reads will work", e),
        }
        tables.push(table);
    }
    Ok(SchemaCatalog::from_tables(tables))
}
