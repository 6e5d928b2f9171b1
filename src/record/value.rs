use std::fmt;

use serde_json::Value;

use crate::document::Document;

/// Placeholder rendered for fields the service did not report.
pub const MISSING_PLACEHOLDER: &str = "-";

/// A field read from a run document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Document(Document),
    List(Vec<Value>),
    Null,
    /// The key was absent. Renders as [`MISSING_PLACEHOLDER`].
    Missing,
}

impl FieldValue {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// String view of text values and of the missing placeholder.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Missing => Some(MISSING_PLACEHOLDER),
            FieldValue::Integer(_)
            | FieldValue::Float(_)
            | FieldValue::Bool(_)
            | FieldValue::Document(_)
            | FieldValue::List(_)
            | FieldValue::Null => None,
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text.clone()),
            Value::Number(number) => number.as_i64().map_or_else(
                || FieldValue::Float(number.as_f64().unwrap_or(f64::NAN)),
                FieldValue::Integer,
            ),
            Value::Bool(flag) => FieldValue::Bool(*flag),
            Value::Object(map) => FieldValue::Document(map.clone()),
            Value::Array(items) => FieldValue::List(items.clone()),
            Value::Null => FieldValue::Null,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Bool(value) => write!(f, "{}", value),
            FieldValue::Document(map) => write!(f, "{}", Value::Object(map.clone())),
            FieldValue::List(items) => write!(f, "{}", Value::Array(items.clone())),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Missing => f.write_str(MISSING_PLACEHOLDER),
        }
    }
}
