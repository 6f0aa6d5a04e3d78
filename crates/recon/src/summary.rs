use std::collections::HashSet;

use crate::model::{MatchDecision, MatchSummary};

/// Compute summary statistics from per-row decisions (one entry per input
/// row, in input order). Only accepted decisions count.
pub fn summarize(per_row: &[Vec<MatchDecision>]) -> MatchSummary {
    let mut rows_matched = 0;
    let mut decisions = 0;
    let mut shows = HashSet::new();

    for row_decisions in per_row {
        let mut matched = false;
        for d in row_decisions.iter().filter(|d| d.is_match) {
            matched = true;
            decisions += 1;
            shows.insert(d.title.show_id);
        }
        if matched {
            rows_matched += 1;
        }
    }

    MatchSummary {
        rows_total: per_row.len(),
        rows_matched,
        rows_unmatched: per_row.len() - rows_matched,
        decisions,
        shows_matched: shows.len(),
    }
}
