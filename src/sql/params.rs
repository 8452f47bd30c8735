//! Request body decoding and the values bound to statements.

use crate::error::AppError;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// A decoded body field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Number(Number),
    Text(String),
}

impl FieldValue {
    pub fn from_json(field: &str, v: Value) -> Result<Self, AppError> {
        Ok(match v {
            Value::Null => FieldValue::Null,
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            Value::Bool(b) => FieldValue::Text(if b { "1" } else { "0" }.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(AppError::InvalidFieldType { field: field.to_string() })
            }
        })
    }

    /// Textual form sent to the database; `None` for null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Decoded write body: field name to value.
pub type FieldMap = HashMap<String, FieldValue>;

/// Decode a raw body into a field map. The body must be a JSON object.
pub fn decode_body(bytes: &[u8]) -> Result<FieldMap, AppError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| AppError::MalformedBody(e.to_string()))?;
    let Value::Object(obj) = value else {
        return Err(AppError::MalformedBody("body must be a JSON object".into()));
    };
    obj.into_iter()
        .map(|(k, v)| {
            let field = FieldValue::from_json(&k, v)?;
            Ok((k, field))
        })
        .collect()
}

/// A value bound to a `?` placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    UInt(u64),
    Text(String),
}

impl From<&FieldValue> for BindValue {
    fn from(v: &FieldValue) -> Self {
        v.as_text().map(BindValue::Text).unwrap_or(BindValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scalar_fields() {
        let body = decode_body(br#"{"name":"Ann","age":31,"bio":null,"admin":true}"#).unwrap();
        assert_eq!(body["name"], FieldValue::Text("Ann".into()));
        assert_eq!(body["age"], FieldValue::Number(31.into()));
        assert_eq!(body["bio"], FieldValue::Null);
        assert_eq!(body["admin"], FieldValue::Text("1".into()));
    }

    #[test]
    fn nested_values_are_invalid_fields() {
        let err = decode_body(br#"{"tags":["a","b"]}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidFieldType { ref field } if field == "tags"));
    }

    #[test]
    fn non_object_bodies_are_malformed() {
        assert!(matches!(decode_body(b"[1,2]"), Err(AppError::MalformedBody(_))));
        assert!(matches!(decode_body(b"{not json"), Err(AppError::MalformedBody(_))));
        assert!(matches!(decode_body(b""), Err(AppError::MalformedBody(_))));
    }

    #[test]
    fn textual_form() {
        assert_eq!(FieldValue::Number(Number::from_f64(1.5).unwrap()).as_text().as_deref(), Some("1.5"));
        assert_eq!(FieldValue::Text("x".into()).as_text().as_deref(), Some("x"));
        assert_eq!(FieldValue::Null.as_text(), None);
        assert_eq!(BindValue::from(&FieldValue::Null), BindValue::Null);
    }
}
