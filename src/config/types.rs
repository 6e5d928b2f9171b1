use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::ValidationError;
use crate::report::OutputFormat;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub runs: Option<i32>,
    pub poll_attempts: Option<u32>,
    pub poll_interval: Option<DurationValue>,
    pub request_timeout: Option<DurationValue>,
    pub concurrent: Option<bool>,
    pub output_format: Option<OutputFormat>,
}

/// Either whole seconds or a `"30s"` / `"500ms"` style string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
