//! MySQL executor over a sqlx pool: introspection queries and statement execution.

use crate::catalog::ColumnMeta;
use crate::executor::{Cell, ExecOutcome, Executor};
use crate::sql::{BindValue, QueryBuf};
use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, Row, ValueRef};

const TABLES_SQL: &str = "SELECT CAST(TABLE_NAME AS CHAR) FROM information_schema.tables \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_TYPE = 'BASE TABLE' ORDER BY TABLE_NAME";

const COLUMNS_SQL: &str = "SELECT CAST(COLUMN_NAME AS CHAR), CAST(COLUMN_TYPE AS CHAR), \
     CAST(IS_NULLABLE AS CHAR), CAST(COLUMN_KEY AS CHAR), CAST(COLUMN_DEFAULT AS CHAR) \
     FROM information_schema.columns WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

#[derive(Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlExecutor { pool }
    }
}

fn bind_all<'q>(q: &'q QueryBuf) -> Query<'q, MySql, MySqlArguments> {
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = match p {
            BindValue::Null => query.bind(None::<String>),
            BindValue::UInt(n) => query.bind(*n),
            BindValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

#[async_trait]
impl Executor for MySqlExecutor {
    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error> {
        tracing::debug!(sql = %TABLES_SQL, "introspect");
        let rows: Vec<(String,)> = sqlx::query_as(TABLES_SQL).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnMeta>, sqlx::Error> {
        tracing::debug!(sql = %COLUMNS_SQL, table = %table, "introspect");
        let rows: Vec<(String, String, String, String, Option<String>)> =
            sqlx::query_as(COLUMNS_SQL).bind(table).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|(name, column_type, is_nullable, column_key, column_default)| ColumnMeta {
                name,
                column_type,
                is_nullable,
                column_key,
                column_default,
            })
            .collect())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<ExecOutcome, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let result = bind_all(q).execute(&self.pool).await?;
        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }

    async fn query(&self, q: &QueryBuf) -> Result<Vec<Vec<Cell>>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(q).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_cells).collect()
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_cells(row: &MySqlRow) -> Result<Vec<Cell>, sqlx::Error> {
    (0..row.len()).map(|i| cell_at(row, i)).collect()
}

fn cell_at(row: &MySqlRow, i: usize) -> Result<Cell, sqlx::Error> {
    if row.try_get_raw(i)?.is_null() {
        return Ok(Cell::Null);
    }
    if let Ok(n) = row.try_get::<i64, _>(i) {
        return Ok(Cell::Int(n));
    }
    if let Ok(n) = row.try_get::<u64, _>(i) {
        return Ok(Cell::UInt(n));
    }
    if let Ok(f) = row.try_get::<f64, _>(i) {
        return Ok(Cell::Float(f));
    }
    if let Ok(f) = row.try_get::<f32, _>(i) {
        return Ok(Cell::Text(f.to_string()));
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDateTime, _>(i) {
        return Ok(Cell::Text(d.format("%Y-%m-%d %H:%M:%S%.f").to_string()));
    }
    if let Ok(d) = row.try_get::<chrono::DateTime<chrono::Utc>, _>(i) {
        return Ok(Cell::Text(d.format("%Y-%m-%d %H:%M:%S%.f").to_string()));
    }
    if let Ok(d) = row.try_get::<chrono::NaiveDate, _>(i) {
        return Ok(Cell::Text(d.format("%Y-%m-%d").to_string()));
    }
    if let Ok(t) = row.try_get::<chrono::NaiveTime, _>(i) {
        return Ok(Cell::Text(t.format("%H:%M:%S%.f").to_string()));
    }
    if let Ok(s) = row.try_get::<String, _>(i) {
        return Ok(Cell::Text(s));
    }
    if let Ok(b) = row.try_get::<Vec<u8>, _>(i) {
        return Ok(Cell::Bytes(b));
    }
    // DECIMAL, JSON and SET travel as text on the wire even without a typed mapping.
    row.try_get_unchecked::<String, _>(i).map(Cell::Text).map_err(|e| {
        tracing::warn!(column = i, error = %e, "undecodable cell");
        e
    })
}
