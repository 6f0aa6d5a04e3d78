//! Year / type / producer acceptance test for a (row, show) candidate pair.
//!
//! Each check passes vacuously when either side lacks the value. Checks run
//! in a fixed order and the first failure names the rejection.

use crate::model::{CsvRow, Rejection, Show, Verdict};
use crate::producers::{has_common_producer, parse_producers};

/// Run the full acceptance test for one candidate.
pub fn assess(row: &CsvRow, show: &Show) -> Verdict {
    let row_producers = parse_producers(row.producers.as_deref());
    assess_with_producers(row, &row_producers, show)
}

/// [`assess`] with the row's producer text already parsed, so a row with many
/// candidates parses it once.
pub(crate) fn assess_with_producers(row: &CsvRow, row_producers: &[String], show: &Show) -> Verdict {
    if let Err(r) = check_year(row.production_year, show.production_year) {
        return Verdict::Rejected(r);
    }
    if let Err(r) = check_type(row.kind.as_deref(), show.kind.as_deref()) {
        return Verdict::Rejected(r);
    }
    if let Err(r) = check_producers(row_producers, &show.producers) {
        return Verdict::Rejected(r);
    }
    Verdict::Accepted
}

pub fn check_year(row: Option<i32>, show: Option<i32>) -> Result<(), Rejection> {
    match (row, show) {
        (Some(row), Some(show)) if row != show => Err(Rejection::YearMismatch { row, show }),
        _ => Ok(()),
    }
}

/// Case-insensitive, no trimming. A blank tag counts as absent.
pub fn check_type(row: Option<&str>, show: Option<&str>) -> Result<(), Rejection> {
    fn present(tag: Option<&str>) -> Option<&str> {
        tag.filter(|t| !t.trim().is_empty())
    }

    match (present(row), present(show)) {
        (Some(r), Some(s)) if r.to_lowercase() != s.to_lowercase() => Err(Rejection::TypeMismatch {
            row: r.to_string(),
            show: s.to_string(),
        }),
        _ => Ok(()),
    }
}

pub fn check_producers(row: &[String], show: &[String]) -> Result<(), Rejection> {
    if row.is_empty() || show.is_empty() || has_common_producer(row, show) {
        Ok(())
    } else {
        Err(Rejection::NoCommonProducer)
    }
}
