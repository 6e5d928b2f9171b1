//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::{Command, CompareArgs, PageTestArgs, RunOptions, SingleArgs};
pub use types::PositiveU32;

pub(crate) use parsers::parse_duration_arg;
