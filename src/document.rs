//! Typed access to JSON response documents.
//!
//! Every accessor reports a [`FieldError`] when the key is absent or holds a
//! value of the wrong shape, so callers can tell "not there" apart from
//! transport or parse failures.
use serde_json::{Map, Value};

use crate::error::FieldError;

/// A parsed JSON object.
pub type Document = Map<String, Value>;

/// Parses `text` into a [`Document`].
///
/// # Errors
///
/// Returns the JSON error when `text` is not valid JSON, or `Ok(None)` when it
/// is valid JSON but not an object.
pub fn parse_document(text: &str) -> Result<Option<Document>, serde_json::Error> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(Some(map)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
            Ok(None)
        }
    }
}

pub trait FieldAccess {
    /// Raw value at `key`.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::Missing` when the key is absent.
    fn field(&self, key: &str) -> Result<&Value, FieldError>;

    /// String value at `key`.
    ///
    /// # Errors
    ///
    /// Returns a `FieldError` when the key is absent or not a string.
    fn str_field(&self, key: &str) -> Result<&str, FieldError> {
        self.field(key)?
            .as_str()
            .ok_or_else(|| FieldError::wrong_type(key, "a string"))
    }

    /// Integer value at `key`.
    ///
    /// Floats are truncated toward zero and numeric strings are parsed, which
    /// matches how the service is known to encode some timings.
    ///
    /// # Errors
    ///
    /// Returns a `FieldError` when the key is absent or not numeric.
    fn int_field(&self, key: &str) -> Result<i64, FieldError> {
        coerce_int(self.field(key)?).ok_or_else(|| FieldError::wrong_type(key, "an integer"))
    }

    /// Nested object at `key`.
    ///
    /// # Errors
    ///
    /// Returns a `FieldError` when the key is absent or not an object.
    fn document_field(&self, key: &str) -> Result<&Document, FieldError> {
        self.field(key)?
            .as_object()
            .ok_or_else(|| FieldError::wrong_type(key, "an object"))
    }
}

impl FieldAccess for Document {
    fn field(&self, key: &str) -> Result<&Value, FieldError> {
        self.get(key).ok_or_else(|| FieldError::missing(key))
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| truncate_float(number.as_f64()?)),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| truncate_float(trimmed.parse::<f64>().ok()?))
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn truncate_float(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    let in_range = truncated.is_finite()
        && truncated >= i64::MIN as f64
        && truncated < i64::MAX as f64;
    in_range.then_some(truncated as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Result<Document, String> {
        parse_document(text)
            .map_err(|err| format!("parse failed: {}", err))?
            .ok_or_else(|| "expected an object".to_owned())
    }

    #[test]
    fn parse_document_requires_object() -> Result<(), String> {
        let array = parse_document("[1, 2]").map_err(|err| format!("parse failed: {}", err))?;
        if array.is_some() {
            return Err("Expected None for an array".to_owned());
        }
        if parse_document("{not json").is_ok() {
            return Err("Expected JSON error".to_owned());
        }
        Ok(())
    }

    #[test]
    fn int_field_coerces_numbers_and_strings() -> Result<(), String> {
        let document = doc(r#"{"a": 12, "b": 12.9, "c": "-7", "d": "3.5", "e": true, "f": "x"}"#)?;
        let checks = [
            (document.int_field("a"), Ok(12)),
            (document.int_field("b"), Ok(12)),
            (document.int_field("c"), Ok(-7)),
            (document.int_field("d"), Ok(3)),
            (
                document.int_field("e"),
                Err(FieldError::wrong_type("e", "an integer")),
            ),
            (
                document.int_field("f"),
                Err(FieldError::wrong_type("f", "an integer")),
            ),
            (document.int_field("g"), Err(FieldError::missing("g"))),
        ];
        for (actual, expected) in checks {
            if actual != expected {
                return Err(format!("Expected {:?}, got {:?}", expected, actual));
            }
        }
        Ok(())
    }

    #[test]
    fn nested_access_reports_failing_key() -> Result<(), String> {
        let document = doc(r#"{"data": {"runs": {"1": {"firstView": []}}}}"#)?;
        let result = document
            .document_field("data")
            .and_then(|data| data.document_field("runs"))
            .and_then(|runs| runs.document_field("1"))
            .and_then(|run| run.document_field("firstView"));
        match result {
            Err(err) if err.key() == "firstView" => Ok(()),
            other => Err(format!("Unexpected result: {:?}", other)),
        }
    }

    #[test]
    fn str_field_rejects_numbers() -> Result<(), String> {
        let document = doc(r#"{"url": "https://example.com", "n": 1}"#)?;
        if document.str_field("url") != Ok("https://example.com") {
            return Err("Unexpected url".to_owned());
        }
        if document.str_field("n").is_ok() {
            return Err("Expected wrong type".to_owned());
        }
        Ok(())
    }
}
