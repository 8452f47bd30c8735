//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table schema.

use crate::catalog::TableSchema;
use crate::error::AppError;
use crate::sql::params::{BindValue, FieldMap, FieldValue};
use std::collections::HashMap;

pub const DEFAULT_LIMIT: u64 = 5;
pub const DEFAULT_OFFSET: u64 = 0;

/// Quote identifier for MySQL (safe: only from the catalog).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: BindValue) {
        self.params.push(v);
    }
}

/// Parse a path identifier for update and delete. Only non-negative integers address a row.
pub fn parse_id(table: &TableSchema, id_str: &str) -> Result<u64, AppError> {
    parse_id_as(table, id_str, "number")
}

fn parse_id_as(table: &TableSchema, id_str: &str, expected: &'static str) -> Result<u64, AppError> {
    id_str.parse().map_err(|_| AppError::InvalidIdentifier {
        table: table.name.clone(),
        expected,
    })
}

/// What a GET on a table asks for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReadQuery {
    /// `?limit=` given; offset is honored only together with limit.
    Page { limit: u64, offset: Option<u64> },
    ById(u64),
    All,
}

impl ReadQuery {
    /// `limit` wins over a path identifier. Unparseable limit/offset fall back to defaults.
    pub fn from_request(
        table: &TableSchema,
        id: Option<&str>,
        params: &HashMap<String, String>,
    ) -> Result<Self, AppError> {
        if let Some(limit) = params.get("limit") {
            let limit = limit.parse().unwrap_or(DEFAULT_LIMIT);
            let offset = params.get("offset").map(|o| o.parse().unwrap_or(DEFAULT_OFFSET));
            return Ok(ReadQuery::Page { limit, offset });
        }
        match id {
            Some(id) => Ok(ReadQuery::ById(parse_id_as(table, id, "number > 0")?)),
            None => Ok(ReadQuery::All),
        }
    }

    pub fn is_by_id(&self) -> bool {
        matches!(self, ReadQuery::ById(_))
    }
}

/// SELECT * in declaration order, restricted by the read query.
pub fn select(table: &TableSchema, read: &ReadQuery) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let base = format!("SELECT * FROM {}", quoted(&table.name));
    q.sql = match *read {
        ReadQuery::Page { limit, offset } => {
            q.push_param(BindValue::UInt(limit));
            match offset {
                Some(offset) => {
                    q.push_param(BindValue::UInt(offset));
                    format!("{} LIMIT ? OFFSET ?", base)
                }
                None => format!("{} LIMIT ?", base),
            }
        }
        ReadQuery::ById(id) => {
            let pk = table.primary_key()?;
            q.push_param(BindValue::UInt(id));
            format!("{} WHERE {} = ?", base, quoted(&pk.name))
        }
        ReadQuery::All => base,
    };
    Ok(q)
}

/// INSERT every non-key column. Missing nullable columns are left to the database;
/// missing NOT NULL columns get an empty string.
pub fn insert(table: &TableSchema, body: &FieldMap) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    for c in table.columns.iter().filter(|c| !c.is_primary_key) {
        let value = match body.get(&c.name) {
            Some(FieldValue::Null) if c.nullable => BindValue::Null,
            Some(FieldValue::Null) => BindValue::Text(String::new()),
            Some(v) => BindValue::from(v),
            None if c.nullable => continue,
            None => BindValue::Text(String::new()),
        };
        cols.push(quoted(&c.name));
        q.push_param(value);
    }
    let placeholders = vec!["?"; cols.len()].join(", ");
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(&table.name),
        cols.join(", "),
        placeholders
    );
    q
}

/// UPDATE by id: SET only the columns present in the body.
/// Returns `None` when the body names no column, so there is nothing to run.
pub fn update(table: &TableSchema, id: u64, body: &FieldMap) -> Result<Option<QueryBuf>, AppError> {
    let pk = table.primary_key()?;
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in &table.columns {
        let Some(value) = body.get(&c.name) else { continue };
        let invalid = || AppError::InvalidFieldType { field: c.name.clone() };
        if c.is_primary_key {
            return Err(invalid());
        }
        match value {
            FieldValue::Number(_) if c.is_text_like() => return Err(invalid()),
            FieldValue::Null if !c.nullable => return Err(invalid()),
            FieldValue::Null => sets.push(format!("{} = DEFAULT", quoted(&c.name))),
            v => {
                q.push_param(BindValue::from(v));
                sets.push(format!("{} = ?", quoted(&c.name)));
            }
        }
    }
    if sets.is_empty() {
        return Ok(None);
    }
    q.push_param(BindValue::UInt(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(&table.name),
        sets.join(", "),
        quoted(&pk.name)
    );
    Ok(Some(q))
}

/// DELETE by id.
pub fn delete(table: &TableSchema, id: u64) -> Result<QueryBuf, AppError> {
    let pk = table.primary_key()?;
    let mut q = QueryBuf::new();
    q.push_param(BindValue::UInt(id));
    q.sql = format!("DELETE FROM {} WHERE {} = ?", quoted(&table.name), quoted(&pk.name));
    Ok(q)
}
