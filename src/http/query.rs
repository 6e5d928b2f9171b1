use std::fmt;

use crate::error::{AppError, AppResult, ValidationError};

/// Appends `key=value` query parameters to a base URL.
///
/// Values are written with their `Display` form and are not percent-encoded;
/// callers pass values that are already safe for a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUrl {
    url: String,
}

impl QueryUrl {
    /// Creates a builder from `base`, dropping a single trailing `?`.
    ///
    /// # Errors
    ///
    /// Returns `UrlIsOnlyQueryMark` when `base` is exactly `"?"`.
    pub fn new(base: &str) -> AppResult<Self> {
        let url = match base.strip_suffix('?') {
            Some("") => return Err(AppError::validation(ValidationError::UrlIsOnlyQueryMark)),
            Some(stripped) => stripped,
            None => base,
        };
        Ok(Self {
            url: url.to_owned(),
        })
    }

    pub fn add_param<V>(&mut self, key: &str, value: V) -> &mut Self
    where
        V: fmt::Display,
    {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url.push(separator);
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(&value.to_string());
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for QueryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
