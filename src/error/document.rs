use thiserror::Error;

/// Failure to read a typed field out of a response document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field '{key}' not found.")]
    Missing { key: String },
    #[error("Field '{key}' is not {expected}.")]
    WrongType { key: String, expected: &'static str },
}

impl FieldError {
    pub(crate) fn missing(key: &str) -> Self {
        FieldError::Missing {
            key: key.to_owned(),
        }
    }

    pub(crate) fn wrong_type(key: &str, expected: &'static str) -> Self {
        FieldError::WrongType {
            key: key.to_owned(),
            expected,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            FieldError::Missing { key } | FieldError::WrongType { key, .. } => key,
        }
    }
}
