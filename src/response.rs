//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
pub struct Success<T> {
    pub response: T,
}

#[derive(Serialize)]
pub struct TableList {
    pub tables: Vec<String>,
}

/// Read payload: `record` for a single row fetched by id, `records` otherwise.
#[derive(Debug, PartialEq, Serialize)]
pub enum Records {
    #[serde(rename = "record")]
    One(Map<String, Value>),
    #[serde(rename = "records")]
    Many(Vec<Map<String, Value>>),
}

pub fn success<T: Serialize>(response: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::OK, Json(Success { response }))
}

/// `{"response":{<key>: <value>}}`, used for insert/update/delete counters.
pub fn success_keyed(key: &str, value: u64) -> (StatusCode, Json<Success<Value>>) {
    let mut payload = Map::new();
    payload.insert(key.to_string(), Value::from(value));
    success(Value::Object(payload))
}

pub fn error_body(message: String) -> Value {
    serde_json::json!({ "error": message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_record_uses_singular_key() {
        let mut row = Map::new();
        row.insert("id".into(), json!(1));
        let body = serde_json::to_value(Success { response: Records::One(row) }).unwrap();
        assert_eq!(body, json!({"response": {"record": {"id": 1}}}));
    }

    #[test]
    fn record_list_uses_plural_key() {
        let body = serde_json::to_value(Success { response: Records::Many(vec![Map::new()]) }).unwrap();
        assert_eq!(body, json!({"response": {"records": [{}]}}));
    }

    #[test]
    fn keyed_counter_envelope() {
        let (status, Json(body)) = success_keyed("deleted", 0);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"response": {"deleted": 0}}));
    }

    #[test]
    fn error_envelope() {
        assert_eq!(error_body("unknown table".into()), json!({"error": "unknown table"}));
    }
}
