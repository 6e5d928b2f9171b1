use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

/// Public WebPageTest submission endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.webpagetest.org/runtest.php";
pub const DEFAULT_POLL_ATTEMPTS: NonZeroU32 = match NonZeroU32::new(10) {
    Some(attempts) => attempts,
    None => NonZeroU32::MIN,
};
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Opaque WebPageTest API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// How often and how long to wait for results to be published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: NonZeroU32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_POLL_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollPolicy {
    /// Longest time spent sleeping before giving up.
    #[must_use]
    pub fn worst_case_wait(&self) -> Duration {
        self.interval
            .saturating_mul(self.max_attempts.get().saturating_sub(1))
    }
}

/// Whether the two pages of a comparison are tested one after the other or
/// at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    #[default]
    Sequential,
    Concurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    pub api_key: ApiKey,
    pub endpoint: String,
    pub poll: PollPolicy,
    pub compare_mode: CompareMode,
}

impl RunnerSettings {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            poll: PollPolicy::default(),
            compare_mode: CompareMode::default(),
        }
    }
}
