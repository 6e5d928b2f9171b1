//! Client for the WebPageTest REST API.
//!
//! [`runner::TestRunner`] submits first-view page-load tests, polls until the
//! results are published and returns one [`record::ResultRecord`] per run.
//! Comparative tests run two pages and pair their records run by run. The
//! `pagetest` binary wraps this with a CLI, config files and text/JSON
//! reports.
pub mod args;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod record;
pub mod report;
pub mod runner;
pub mod time;
