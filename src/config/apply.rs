use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU32, RunOptions};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI options that were not set explicitly.
///
/// `matches` are the subcommand's matches, where the run options live.
/// Values from the environment (such as `WPT_API_KEY`) still win over the
/// config file.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    options: &mut RunOptions,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "api_key")
        && let Some(api_key) = config.api_key.clone()
    {
        options.api_key = Some(api_key);
    }

    if !is_explicit(matches, "endpoint")
        && let Some(endpoint) = config.endpoint.clone()
    {
        options.endpoint = endpoint;
    }

    if !is_explicit(matches, "runs")
        && let Some(runs) = config.runs
    {
        options.runs = runs;
    }

    if !is_explicit(matches, "poll_attempts")
        && let Some(attempts) = config.poll_attempts
    {
        options.poll_attempts = ensure_positive_u32(attempts, "poll_attempts")?;
    }

    if !is_explicit(matches, "poll_interval")
        && let Some(interval) = config.poll_interval.as_ref()
    {
        options.poll_interval = to_duration(interval, "poll_interval")?;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.request_timeout.as_ref()
    {
        options.request_timeout = to_duration(timeout, "request_timeout")?;
    }

    if !is_explicit(matches, "concurrent")
        && let Some(concurrent) = config.concurrent
    {
        options.concurrent = concurrent;
    }

    if !is_explicit(matches, "output_format")
        && let Some(format) = config.output_format
    {
        options.output_format = format;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_u32(value: u32, field: &str) -> AppResult<PositiveU32> {
    PositiveU32::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn to_duration(value: &DurationValue, field: &str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source: err,
        })
    })
}
