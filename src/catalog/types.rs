//! Column and table metadata as reported by the database.

use crate::error::AppError;
use std::collections::HashMap;

/// One row of column introspection, verbatim from `information_schema.columns`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMeta {
    pub name: String,
    /// Full declared type, e.g. `int`, `varchar(255)`, `text`.
    pub column_type: String,
    /// `YES` or `NO`.
    pub is_nullable: String,
    /// `PRI`, `UNI`, `MUL` or empty.
    pub column_key: String,
    pub column_default: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub declared_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub has_default: bool,
}

impl From<ColumnMeta> for Column {
    fn from(meta: ColumnMeta) -> Self {
        Column {
            nullable: meta.is_nullable == "YES",
            is_primary_key: meta.column_key == "PRI",
            has_default: meta.column_default.is_some(),
            declared_type: meta.column_type,
            name: meta.name,
        }
    }
}

impl Column {
    /// Character columns whose values must be JSON strings on update.
    pub fn is_text_like(&self) -> bool {
        let ty = self.declared_type.to_ascii_lowercase();
        matches!(ty.as_str(), "tinytext" | "text" | "mediumtext" | "longtext")
            || ty.starts_with("varchar(")
            || ty.starts_with("char(")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
    pub name: String,
    /// Declaration order.
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        TableSchema {
            name: name.into(),
            columns,
        }
    }

    /// The single primary-key column. Tables without exactly one cannot be addressed by id.
    pub fn primary_key(&self) -> Result<&Column, AppError> {
        let mut keys = self.columns.iter().filter(|c| c.is_primary_key);
        match (keys.next(), keys.next()) {
            (Some(pk), None) => Ok(pk),
            _ => Err(AppError::MissingPrimaryKey {
                table: self.name.clone(),
                count: self.columns.iter().filter(|c| c.is_primary_key).count(),
            }),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// NOT NULL non-key columns with no database default. An insert omitting one of these
    /// stores an empty string.
    pub fn required_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| !c.is_primary_key && !c.nullable && !c.has_default)
    }
}

/// Immutable table name to schema mapping, shared by every request.
#[derive(Clone, Debug, Default)]
pub struct SchemaCatalog {
    tables: HashMap<String, TableSchema>,
}

impl SchemaCatalog {
    pub fn from_tables(tables: impl IntoIterator<Item = TableSchema>) -> Self {
        SchemaCatalog {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// Table names sorted ascending.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
