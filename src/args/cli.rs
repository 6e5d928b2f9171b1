use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::report::OutputFormat;
use crate::runner::DEFAULT_ENDPOINT;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_u32};
use super::types::PositiveU32;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Run WebPageTest page-load tests for one or two URLs and report first-view timings."
)]
pub struct PageTestArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Test a single page
    Single(SingleArgs),
    /// Test two pages and pair their results run by run
    Compare(CompareArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SingleArgs {
    /// Page URL to test
    #[arg(long, short)]
    pub url: String,

    #[command(flatten)]
    pub options: RunOptions,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Page URLs to compare (exactly two)
    #[arg(long = "url", short = 'u', num_args = 1, required = true)]
    pub urls: Vec<String>,

    #[command(flatten)]
    pub options: RunOptions,
}

#[derive(Debug, Args, Clone)]
pub struct RunOptions {
    /// WebPageTest API key
    #[arg(long = "api-key", env = "WPT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Number of runs per page (values below 1 run nothing)
    #[arg(long, short = 'n', default_value_t = 1, allow_negative_numbers = true)]
    pub runs: i32,

    /// Test submission endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Polling attempts before giving up on results
    #[arg(long = "poll-attempts", default_value = "10", value_parser = parse_positive_u32)]
    pub poll_attempts: PositiveU32,

    /// Wait between polling attempts (supports ms/s/m/h)
    #[arg(long = "poll-interval", default_value = "30s", value_parser = parse_duration_arg)]
    pub poll_interval: Duration,

    /// Per-request HTTP timeout (supports ms/s/m/h)
    #[arg(long = "request-timeout", default_value = "60s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Test both pages of a comparison at the same time
    #[arg(long)]
    pub concurrent: bool,

    /// Output format
    #[arg(long = "output-format", short = 'o', default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by PAGETEST_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./pagetest.toml or ./pagetest.json if present.
    #[arg(long)]
    pub config: Option<String>,
}

impl Command {
    #[must_use]
    pub const fn options(&self) -> &RunOptions {
        match self {
            Command::Single(args) => &args.options,
            Command::Compare(args) => &args.options,
        }
    }

    pub fn options_mut(&mut self) -> &mut RunOptions {
        match self {
            Command::Single(args) => &mut args.options,
            Command::Compare(args) => &mut args.options,
        }
    }
}
