//! Generic CRUD execution: build the statement, run it, shape the result.

use crate::catalog::TableSchema;
use crate::error::AppError;
use crate::executor::Executor;
use crate::mapper;
use crate::response::Records;
use crate::sql::{self, FieldMap, ReadQuery};

pub struct CrudService;

impl CrudService {
    /// Rows for a read query; singular only for a by-id read matching one row.
    pub async fn read(executor: &dyn Executor, table: &TableSchema, read: &ReadQuery) -> Result<Records, AppError> {
        let q = sql::select(table, read)?;
        let rows = executor.query(&q).await?;
        mapper::shape(table, rows, read)
    }

    /// Insert one row. Returns the key column name and the id assigned by the database.
    pub async fn insert<'t>(
        executor: &dyn Executor,
        table: &'t TableSchema,
        body: &FieldMap,
    ) -> Result<(&'t str, u64), AppError> {
        let pk = table.primary_key()?;
        let blanked: Vec<&str> = table
            .required_columns()
            .filter(|c| !matches!(body.get(&c.name), Some(v) if v.as_text().is_some()))
            .map(|c| c.name.as_str())
            .collect();
        if !blanked.is_empty() {
            tracing::debug!(table = %table.name, columns = ?blanked, "no value or default, storing empty string");
        }
        let q = sql::insert(table, body);
        let outcome = executor.execute(&q).await?;
        Ok((pk.name.as_str(), outcome.last_insert_id))
    }

    /// Update one row by id. Returns affected rows; 0 when nothing matched or changed.
    pub async fn update(executor: &dyn Executor, table: &TableSchema, id: u64, body: &FieldMap) -> Result<u64, AppError> {
        let Some(q) = sql::update(table, id, body)? else {
            tracing::debug!(table = %table.name, id, "update names no column, skipping");
            return Ok(0);
        };
        Ok(executor.execute(&q).await?.rows_affected)
    }

    /// Delete one row by id. Returns affected rows.
    pub async fn delete(executor: &dyn Executor, table: &TableSchema, id: u64) -> Result<u64, AppError> {
        let q = sql::delete(table, id)?;
        Ok(executor.execute(&q).await?.rows_affected)
    }
}
