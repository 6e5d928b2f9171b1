use crate::record::{ComparativeResultRecord, ResultRecord};

/// Number of pairs to build from two result lists.
///
/// The service may return fewer runs than requested (free-tier limits), and
/// not necessarily the same number for both pages.
#[must_use]
pub(crate) fn effective_runs(requested: i32, first: usize, second: usize) -> usize {
    let requested = usize::try_from(requested).unwrap_or(0);
    if first == second && requested > first {
        first
    } else {
        first.min(second)
    }
}

pub(crate) fn pair_results(
    requested: i32,
    first: Vec<ResultRecord>,
    second: Vec<ResultRecord>,
) -> Vec<ComparativeResultRecord> {
    let count = effective_runs(requested, first.len(), second.len());
    first
        .into_iter()
        .zip(second)
        .take(count)
        .map(|(left, right)| ComparativeResultRecord::new(left, right))
        .collect()
}
