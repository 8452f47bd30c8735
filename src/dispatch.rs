//! Maps method + path onto a table and one of the four operations.

use crate::catalog::{SchemaCatalog, TableSchema};
use crate::error::AppError;
use axum::http::Method;

#[derive(Debug, PartialEq)]
pub enum Operation<'a> {
    /// `None` for the table root.
    Read { id: Option<&'a str> },
    Insert,
    Update { id: &'a str },
    Delete { id: &'a str },
}

#[derive(Debug)]
pub struct Route<'a> {
    pub table: &'a TableSchema,
    pub op: Operation<'a>,
}

/// The first path segment names the table; everything after `/<table>/` is the row id.
pub fn dispatch<'a>(catalog: &'a SchemaCatalog, method: &Method, path: &'a str) -> Result<Route<'a>, AppError> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let (name, rest) = match trimmed.split_once('/') {
        Some((name, rest)) => (name, Some(rest)),
        None => (trimmed, None),
    };
    let table = catalog.table(name).ok_or(AppError::UnknownTable)?;
    let op = match *method {
        Method::GET => Operation::Read {
            id: rest.filter(|id| !id.is_empty()),
        },
        Method::PUT if rest == Some("") => Operation::Insert,
        Method::PUT => {
            return Err(AppError::InvalidPath {
                table: table.name.clone(),
            })
        }
        Method::POST => Operation::Update { id: rest.unwrap_or("") },
        Method::DELETE => Operation::Delete { id: rest.unwrap_or("") },
        _ => return Err(AppError::MethodNotAllowed),
    };
    Ok(Route { table, op })
}
