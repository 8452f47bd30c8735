//! Executor seam: the only way the core talks to the database.

use crate::catalog::ColumnMeta;
use crate::sql::QueryBuf;
use async_trait::async_trait;

/// One fetched cell, as decoded from the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Cell {
    /// Textual representation of the cell, as the server would print it. `None` for null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Int(n) => Some(n.to_string()),
            Cell::UInt(n) => Some(n.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Text(s) => Some(s.clone()),
            Cell::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

/// Result of a statement that returns no rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

#[async_trait]
pub trait Executor: Send + Sync {
    /// Base tables of the connected database.
    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error>;

    /// Column metadata in declaration order.
    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnMeta>, sqlx::Error>;

    async fn execute(&self, q: &QueryBuf) -> Result<ExecOutcome, sqlx::Error>;

    /// Rows of cells, each row in the statement's column order.
    async fn query(&self, q: &QueryBuf) -> Result<Vec<Vec<Cell>>, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text() {
        assert_eq!(Cell::Null.as_text(), None);
        assert_eq!(Cell::Int(-4).as_text().as_deref(), Some("-4"));
        assert_eq!(Cell::UInt(u64::MAX).as_text().as_deref(), Some("18446744073709551615"));
        assert_eq!(Cell::Float(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(Cell::Bytes(b"abc".to_vec()).as_text().as_deref(), Some("abc"));
    }
}
