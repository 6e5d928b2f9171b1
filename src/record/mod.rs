//! Per-run result records.
mod value;


pub use value::{FieldValue, MISSING_PLACEHOLDER};

use crate::document::{Document, FieldAccess};
use crate::error::FieldError;
use crate::time::{Seconds, millis_to_seconds};

/// Field names of the first-view timings reported by the service.
pub mod metric {
    pub const LOAD_TIME: &str = "loadTime";
    pub const FIRST_CONTENTFUL_PAINT: &str = "firstContentfulPaint";
    pub const DOC_TIME: &str = "docTime";
    pub const FULLY_LOADED: &str = "fullyLoaded";
}

/// First-view data of one test run together with the tested URL.
///
/// Accessors read from the raw document on every call and fall back to a
/// default instead of failing when a field is missing or mistyped.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    first_view: Document,
    url: String,
}

impl ResultRecord {
    #[must_use]
    pub const fn new(first_view: Document, url: String) -> Self {
        Self { first_view, url }
    }

    /// The raw first-view document.
    #[must_use]
    pub const fn first_view(&self) -> &Document {
        &self.first_view
    }

    /// The tested URL as echoed by the service.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Value at `key`, or [`FieldValue::Missing`] when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> FieldValue {
        self.first_view
            .field(key)
            .map_or(FieldValue::Missing, FieldValue::from)
    }

    /// String at `key`; `"-"` when the field is missing or not a string.
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        self.try_get_string(key)
            .unwrap_or(MISSING_PLACEHOLDER)
            .to_owned()
    }

    /// Strict string accessor.
    ///
    /// # Errors
    ///
    /// Returns a `FieldError` when the field is missing or not a string.
    pub fn try_get_string(&self, key: &str) -> Result<&str, FieldError> {
        self.first_view.str_field(key)
    }

    /// Integer at `key`; `0` when the field is missing or not numeric.
    #[must_use]
    pub fn get_int(&self, key: &str) -> i64 {
        self.first_view.int_field(key).unwrap_or(0)
    }

    /// Millisecond field at `key` converted to seconds; zero when missing.
    #[must_use]
    pub fn get_seconds(&self, key: &str) -> Seconds {
        self.first_view
            .int_field(key)
            .map_or(Seconds::ZERO, millis_to_seconds)
    }

    #[must_use]
    pub fn load_time(&self) -> Seconds {
        self.get_seconds(metric::LOAD_TIME)
    }

    #[must_use]
    pub fn first_contentful_paint(&self) -> Seconds {
        self.get_seconds(metric::FIRST_CONTENTFUL_PAINT)
    }

    #[must_use]
    pub fn doc_time(&self) -> Seconds {
        self.get_seconds(metric::DOC_TIME)
    }

    #[must_use]
    pub fn fully_loaded(&self) -> Seconds {
        self.get_seconds(metric::FULLY_LOADED)
    }
}

/// Results of the same run index for two compared pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeResultRecord {
    pub first: ResultRecord,
    pub second: ResultRecord,
}

impl ComparativeResultRecord {
    #[must_use]
    pub const fn new(first: ResultRecord, second: ResultRecord) -> Self {
        Self { first, second }
    }

    #[must_use]
    pub const fn pages(&self) -> [&ResultRecord; 2] {
        [&self.first, &self.second]
    }
}
