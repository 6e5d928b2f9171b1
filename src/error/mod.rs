mod app;
mod config;
mod document;
mod http;
mod service;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use document::FieldError;
pub use http::HttpError;
pub use service::ServiceError;
pub use validation::ValidationError;
