//! Text and JSON rendering of test results.
use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::record::{ComparativeResultRecord, ResultRecord};
use crate::time::Seconds;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ViewTimings<'rec> {
    run: usize,
    url: &'rec str,
    load_time: Seconds,
    first_contentful_paint: Seconds,
    doc_time: Seconds,
    fully_loaded: Seconds,
}

impl<'rec> ViewTimings<'rec> {
    fn new(run: usize, record: &'rec ResultRecord) -> Self {
        Self {
            run,
            url: record.url(),
            load_time: record.load_time(),
            first_contentful_paint: record.first_contentful_paint(),
            doc_time: record.doc_time(),
            fully_loaded: record.fully_loaded(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PairTimings<'rec> {
    run: usize,
    first: ViewTimings<'rec>,
    second: ViewTimings<'rec>,
}

/// Renders single-page results, one entry per run.
///
/// # Errors
///
/// Returns an error when formatting or JSON serialization fails.
pub fn render_single(records: &[ResultRecord], format: OutputFormat) -> AppResult<String> {
    let views: Vec<ViewTimings<'_>> = records
        .iter()
        .enumerate()
        .map(|(index, record)| ViewTimings::new(index.saturating_add(1), record))
        .collect();
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for view in &views {
                write_view(&mut output, view)?;
            }
            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&views)?),
    }
}

/// Renders paired results of a comparative test.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_comparative(
    pairs: &[ComparativeResultRecord],
    format: OutputFormat,
) -> AppResult<String> {
    let rows: Vec<PairTimings<'_>> = pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            let run = index.saturating_add(1);
            PairTimings {
                run,
                first: ViewTimings::new(run, &pair.first),
                second: ViewTimings::new(run, &pair.second),
            }
        })
        .collect();
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for row in &rows {
                write_view(&mut output, &row.first)?;
                write_view(&mut output, &row.second)?;
            }
            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}

fn write_view(output: &mut String, view: &ViewTimings<'_>) -> std::fmt::Result {
    writeln!(output, "View {} (run {}):", view.url, view.run)?;
    writeln!(output, "  Load Time: {}", view.load_time)?;
    writeln!(
        output,
        "  First Contentful Paint: {}",
        view.first_contentful_paint
    )?;
    writeln!(output, "  Document Complete Time: {}", view.doc_time)?;
    writeln!(output, "  Fully Loaded Time: {}", view.fully_loaded)
}
