//! Converts fetched cells into JSON rows and picks the response shape.

use crate::catalog::TableSchema;
use crate::error::AppError;
use crate::executor::Cell;
use crate::response::Records;
use crate::sql::ReadQuery;
use serde_json::{Map, Value};

/// Null stays null; anything whose text parses as an integer becomes a number; the rest is a string.
pub fn cell_to_value(cell: &Cell) -> Value {
    match cell.as_text() {
        None => Value::Null,
        Some(text) => match text.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(text),
        },
    }
}

/// Cells arrive in declaration order (`SELECT *`), so names come from the schema.
pub fn row_to_json(table: &TableSchema, cells: &[Cell]) -> Map<String, Value> {
    table
        .columns
        .iter()
        .zip(cells)
        .map(|(c, cell)| (c.name.clone(), cell_to_value(cell)))
        .collect()
}

pub fn shape(table: &TableSchema, rows: Vec<Vec<Cell>>, read: &ReadQuery) -> Result<Records, AppError> {
    let mut rows: Vec<Map<String, Value>> = rows.iter().map(|r| row_to_json(table, r)).collect();
    match rows.len() {
        0 => Err(AppError::RecordNotFound),
        1 if read.is_by_id() => Ok(Records::One(rows.remove(0))),
        _ => Ok(Records::Many(rows)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Column;
    use serde_json::json;

    fn table() -> TableSchema {
        let col = |name: &str, pk: bool| Column {
            name: name.into(),
            declared_type: "text".into(),
            nullable: !pk,
            is_primary_key: pk,
            has_default: false,
        };
        TableSchema::new("users", vec![col("id", true), col("name", false), col("bio", false)])
    }

    #[test]
    fn numeric_sniffing() {
        assert_eq!(cell_to_value(&Cell::Null), Value::Null);
        assert_eq!(cell_to_value(&Cell::Int(7)), json!(7));
        assert_eq!(cell_to_value(&Cell::Text("42".into())), json!(42));
        assert_eq!(cell_to_value(&Cell::Text("-3".into())), json!(-3));
        assert_eq!(cell_to_value(&Cell::Text("4.5".into())), json!("4.5"));
        assert_eq!(cell_to_value(&Cell::Float(1.25)), json!("1.25"));
        assert_eq!(cell_to_value(&Cell::Text("Ann".into())), json!("Ann"));
        assert_eq!(cell_to_value(&Cell::UInt(u64::MAX)), json!("18446744073709551615"));
    }

    #[test]
    fn rows_follow_schema_names() {
        let row = row_to_json(&table(), &[Cell::Int(1), Cell::Text("Ann".into()), Cell::Null]);
        assert_eq!(Value::Object(row), json!({"id": 1, "name": "Ann", "bio": null}));
    }

    #[test]
    fn empty_result_is_not_found() {
        assert!(matches!(shape(&table(), vec![], &ReadQuery::All), Err(AppError::RecordNotFound)));
        assert!(matches!(shape(&table(), vec![], &ReadQuery::ById(1)), Err(AppError::RecordNotFound)));
    }

    #[test]
    fn single_row_by_id_is_singular() {
        let rows = vec![vec![Cell::Int(1), Cell::Text("Ann".into()), Cell::Null]];
        let Records::One(row) = shape(&table(), rows, &ReadQuery::ById(1)).unwrap() else {
            panic!("expected singular record");
        };
        assert_eq!(row["name"], json!("Ann"));
    }

    #[test]
    fn single_row_of_a_page_stays_plural() {
        let rows = vec![vec![Cell::Int(1), Cell::Text("Ann".into()), Cell::Null]];
        let page = ReadQuery::Page { limit: 5, offset: None };
        assert!(matches!(shape(&table(), rows, &page).unwrap(), Records::Many(ref r) if r.len() == 1));
    }
}
