//! Submits tests to WebPageTest, waits for the results and extracts one
//! record per run.
mod compare;
mod poll;
mod settings;
mod sleep;


use std::cmp::Ordering;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::document::{Document, FieldAccess, parse_document};
use crate::error::{AppError, AppResult, FieldError, ServiceError};
use crate::http::{Fetch, HttpFetcher, QueryUrl, redact_api_key};
use crate::record::{ComparativeResultRecord, MISSING_PLACEHOLDER, ResultRecord, metric};

pub use poll::{PollState, Probe};
pub use settings::{
    ApiKey, CompareMode, DEFAULT_ENDPOINT, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT, PollPolicy, RunnerSettings,
};
pub use sleep::{Sleep, TokioSleeper};

use compare::pair_results;

/// Drives the WebPageTest REST API for one or two pages.
#[derive(Debug)]
pub struct TestRunner<F = HttpFetcher, S = TokioSleeper> {
    settings: RunnerSettings,
    fetcher: F,
    sleeper: S,
}

impl TestRunner<HttpFetcher, TokioSleeper> {
    /// Creates a runner against the public endpoint with default polling.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> AppResult<Self> {
        Self::from_settings(RunnerSettings::new(api_key), DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a runner from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_settings(settings: RunnerSettings, request_timeout: Duration) -> AppResult<Self> {
        let fetcher = HttpFetcher::new(request_timeout)?;
        Ok(Self::with_parts(settings, fetcher, TokioSleeper))
    }
}

impl<F, S> TestRunner<F, S>
where
    F: Fetch,
    S: Sleep,
{
    #[must_use]
    pub const fn with_parts(settings: RunnerSettings, fetcher: F, sleeper: S) -> Self {
        Self {
            settings,
            fetcher,
            sleeper,
        }
    }

    /// Submits a first-view-only test of `page_url` and returns the
    /// submission response.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response is not a JSON
    /// object.
    pub async fn request(&self, runs: i32, page_url: &str) -> AppResult<Document> {
        let mut url = QueryUrl::new(&self.settings.endpoint)?;
        url.add_param("k", self.settings.api_key.expose())
            .add_param("url", page_url)
            .add_param("f", "json")
            .add_param("runs", runs)
            // First view only: repeat views count against the daily page-load quota.
            .add_param("fvonly", 1);

        info!("Submitting {} run(s) for {}", runs, page_url);
        let body = self.fetcher.fetch(url.as_str()).await?;
        let display_url = redact_api_key(url.as_str());
        match parse_document(&body) {
            Ok(Some(document)) => Ok(document),
            Ok(None) => Err(AppError::service(ServiceError::NotAnObject { url: display_url })),
            Err(err) => Err(AppError::service(ServiceError::InvalidDocument {
                url: display_url,
                source: err,
            })),
        }
    }

    /// Waits for the results of a submitted test and returns one record per
    /// run the service populated.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionRejected` when the submission carries no `data`,
    /// `ResultsUnavailable` when the polling budget runs out, and propagates
    /// transport errors without retrying them.
    pub async fn parse(&self, submission: &Document) -> AppResult<Vec<ResultRecord>> {
        let Ok(data) = submission.document_field("data") else {
            return Err(AppError::service(rejection(submission)));
        };
        let results_url = data
            .str_field("jsonUrl")
            .map_err(|err| AppError::service(ServiceError::MalformedSubmission { source: err }))?;

        debug!("Test accepted, results at {}", results_url);
        match self.poll_results(results_url).await? {
            Some(results) => collect_records(&results, results_url),
            None => Ok(Vec::new()),
        }
    }

    /// Tests a single page `runs` times.
    ///
    /// A run count below one returns an empty list without contacting the
    /// service.
    ///
    /// # Errors
    ///
    /// See [`TestRunner::request`] and [`TestRunner::parse`].
    pub async fn run_single_test(&self, runs: i32, page_url: &str) -> AppResult<Vec<ResultRecord>> {
        if runs < 1 {
            return Ok(Vec::new());
        }
        let submission = self.request(runs, page_url).await?;
        self.parse(&submission).await
    }

    /// Tests two pages `runs` times each and pairs their results by run.
    ///
    /// # Errors
    ///
    /// Returns the first page's error when its workflow fails, otherwise the
    /// second page's. In concurrent mode the second page is abandoned once the
    /// first fails.
    pub async fn run_comparative_test(
        &self,
        runs: i32,
        page1_url: &str,
        page2_url: &str,
    ) -> AppResult<Vec<ComparativeResultRecord>> {
        if runs < 1 {
            return Ok(Vec::new());
        }

        let (first, second) = match self.settings.compare_mode {
            CompareMode::Sequential => {
                let first = self.run_single_test(runs, page1_url).await?;
                let second = self.run_single_test(runs, page2_url).await?;
                (first, second)
            }
            CompareMode::Concurrent => self.run_both(runs, page1_url, page2_url).await?,
        };

        if first.len() != second.len() {
            warn!(
                "Result counts differ ({} vs {}); pairing the first {}",
                first.len(),
                second.len(),
                first.len().min(second.len())
            );
        }
        Ok(pair_results(runs, first, second))
    }

    /// Runs both pages at once. Page 1's error always wins; page 2 is
    /// abandoned as soon as page 1 fails, and a page 2 failure is logged
    /// when page 1 fails too.
    async fn run_both(
        &self,
        runs: i32,
        page1_url: &str,
        page2_url: &str,
    ) -> AppResult<(Vec<ResultRecord>, Vec<ResultRecord>)> {
        let page1 = self.run_single_test(runs, page1_url);
        let page2 = self.run_single_test(runs, page2_url);
        tokio::pin!(page1);
        tokio::pin!(page2);

        tokio::select! {
            biased;
            outcome = &mut page1 => match outcome {
                Ok(first) => Ok((first, page2.await?)),
                Err(err) => {
                    warn!("Test of {} failed; abandoning {}", page1_url, page2_url);
                    Err(err)
                }
            },
            outcome = &mut page2 => match (page1.await, outcome) {
                (Ok(first), Ok(second)) => Ok((first, second)),
                (Ok(_), Err(err)) => Err(err),
                (Err(err), Ok(_)) => Err(err),
                (Err(err), Err(second_err)) => {
                    warn!("Test of {} also failed: {}", page2_url, second_err);
                    Err(err)
                }
            },
        }
    }

    async fn poll_results(&self, results_url: &str) -> AppResult<Option<Document>> {
        let policy = self.settings.poll;
        let mut state = PollState::Submitted;
        let mut results = None;

        loop {
            state = match state {
                PollState::Submitted => state.start(),
                PollState::Polling { attempt } => {
                    if state.waits_before_attempt() {
                        self.sleeper.sleep(policy.interval).await;
                    }
                    debug!(
                        "Polling {} (attempt {}/{})",
                        results_url,
                        attempt,
                        policy.max_attempts
                    );
                    results = self.probe_results(results_url).await?;
                    let probe = if results.is_some() {
                        Probe::Ready
                    } else {
                        Probe::Pending
                    };
                    state.advance(probe, &policy)
                }
                PollState::Ready { attempt } => {
                    info!("Results ready after {} attempt(s)", attempt);
                    return Ok(results);
                }
                PollState::TimedOut { attempts } => {
                    return Err(AppError::service(ServiceError::ResultsUnavailable {
                        url: results_url.to_owned(),
                        attempts,
                    }));
                }
            };
        }
    }

    /// Fetches the results document and returns its `data` once the first
    /// run's first view is populated.
    async fn probe_results(&self, results_url: &str) -> AppResult<Option<Document>> {
        let body = self.fetcher.fetch(results_url).await?;
        let mut document = match parse_document(&body) {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!("Results at {} are not an object yet", results_url);
                return Ok(None);
            }
            Err(err) => {
                debug!("Results at {} are not valid JSON yet: {}", results_url, err);
                return Ok(None);
            }
        };

        let data = match document.remove("data") {
            Some(serde_json::Value::Object(data)) => data,
            Some(_) | None => {
                debug!("Results at {} have no data yet", results_url);
                return Ok(None);
            }
        };

        match first_run_paint(&data) {
            Ok(_) => Ok(Some(data)),
            Err(err) => {
                debug!("Test still running: {}", err);
                Ok(None)
            }
        }
    }
}

/// `runs` is only populated once every run has finished, so the first run's
/// paint time doubles as a completion marker.
fn first_run_paint(data: &Document) -> Result<i64, FieldError> {
    data.document_field("runs")?
        .document_field("1")?
        .document_field("firstView")?
        .int_field(metric::FIRST_CONTENTFUL_PAINT)
}

fn rejection(submission: &Document) -> ServiceError {
    ServiceError::SubmissionRejected {
        status_code: submission.int_field("statusCode").unwrap_or(0),
        status_text: submission
            .str_field("statusText")
            .unwrap_or(MISSING_PLACEHOLDER)
            .to_owned(),
    }
}

fn collect_records(data: &Document, results_url: &str) -> AppResult<Vec<ResultRecord>> {
    let malformed = |err: FieldError| {
        AppError::service(ServiceError::MalformedResults {
            url: results_url.to_owned(),
            source: err,
        })
    };

    let tested_url = data.str_field("url").map_err(malformed)?;
    let runs = data.document_field("runs").map_err(malformed)?;

    let mut keys: Vec<&String> = runs.keys().collect();
    keys.sort_by(|left, right| run_order(left, right));

    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        let first_view = runs
            .document_field(key)
            .and_then(|run| run.document_field("firstView"))
            .map_err(malformed)?;
        records.push(ResultRecord::new(first_view.clone(), tested_url.to_owned()));
    }
    Ok(records)
}

/// Numeric run indices first in ascending order, anything else after.
fn run_order(left: &str, right: &str) -> Ordering {
    match (left.parse::<u64>(), right.parse::<u64>()) {
        (Ok(left_index), Ok(right_index)) => left_index.cmp(&right_index),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => left.cmp(right),
    }
}
