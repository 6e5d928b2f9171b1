use thiserror::Error;

use super::FieldError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Test submission rejected: {status_code} - {status_text}")]
    SubmissionRejected {
        status_code: i64,
        status_text: String,
    },
    #[error("Test submission response is malformed: {source}")]
    MalformedSubmission {
        #[source]
        source: FieldError,
    },
    #[error("Response from {url} is not a JSON object: {source}")]
    InvalidDocument {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Response from {url} is not a JSON object.")]
    NotAnObject { url: String },
    #[error("the data could not be retrieved from: {url}")]
    ResultsUnavailable { url: String, attempts: u32 },
    #[error("Results from {url} are malformed: {source}")]
    MalformedResults {
        url: String,
        #[source]
        source: FieldError,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
