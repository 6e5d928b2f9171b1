use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{AppError, AppResult, HttpError};

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("pagetest/", env!("CARGO_PKG_VERSION"));

/// Fetches the body of a URL as text.
///
/// The runner never retries at this layer; any error returned here is
/// propagated to the caller unchanged.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent, the server answers
    /// with a non-success status, or the body cannot be read.
    async fn fetch(&self, url: &str) -> AppResult<String>;
}

/// `reqwest`-backed [`Fetch`] implementation.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests time out after `request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(request_timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> AppResult<String> {
        let display_url = redact_api_key(url);
        let parsed = Url::parse(url).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: display_url.clone(),
                source: err,
            })
        })?;

        let response = self.client.get(parsed).send().await.map_err(|err| {
            AppError::http(HttpError::RequestFailed {
                url: display_url.clone(),
                source: err.without_url(),
            })
        })?;

        let status = response.status();
        debug!("GET {} -> {}", display_url, status.as_u16());
        if !status.is_success() {
            return Err(AppError::http(HttpError::UnexpectedStatus {
                url: display_url,
                status: status.as_u16(),
            }));
        }

        response.text().await.map_err(|err| {
            AppError::http(HttpError::ReadBody {
                url: display_url,
                source: err.without_url(),
            })
        })
    }
}

/// Masks the value of the `k` (API key) query parameter.
pub(crate) fn redact_api_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_owned();
    };
    let pairs: Vec<&str> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("k", _)) => "k=***",
            Some(_) | None => pair,
        })
        .collect();
    format!("{}?{}", base, pairs.join("&"))
}
