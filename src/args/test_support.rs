use clap::Parser;

use crate::error::{AppError, AppResult};

use super::PageTestArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<PageTestArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    PageTestArgs::try_parse_from(args).map_err(AppError::from)
}
