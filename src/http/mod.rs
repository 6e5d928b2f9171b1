//! Request URL construction and the HTTP transport seam.
mod fetch;
mod query;


pub use fetch::{Fetch, HttpFetcher};
pub use query::QueryUrl;

pub(crate) use fetch::redact_api_key;
