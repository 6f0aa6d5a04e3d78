use rayon::prelude::*;
use serde::Serialize;

use crate::config::MatchOptions;
use crate::error::ReconError;
use crate::index::CatalogIndex;
use crate::matcher::{evaluate_row, find_matches_for_row};
use crate::model::{CsvRow, MatchDecision, MatchSummary};
use crate::summary::summarize;

/// Outcome of one batch.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRun {
    pub summary: MatchSummary,
    pub decisions: Vec<MatchDecision>,
    /// Empty unless `include_rejections` is set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejections: Vec<MatchDecision>,
}

/// Match a batch of rows against a built index. Rows are evaluated
/// independently in parallel; with `threads > 0` on a dedicated pool.
///
/// Only pool construction can fail. Rows without matches are a normal outcome.
pub fn run(index: &CatalogIndex, rows: &[CsvRow], options: &MatchOptions) -> Result<MatchRun, ReconError> {
    let per_row = if options.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .thread_name(|i| format!("showmatch-{i}"))
            .build()
            .map_err(|e| ReconError::ThreadPool(e.to_string()))?;
        pool.install(|| evaluate_batch(index, rows, options))
    } else {
        evaluate_batch(index, rows, options)
    };

    let summary = summarize(&per_row);

    let (decisions, rejections): (Vec<_>, Vec<_>) =
        per_row.into_iter().flatten().partition(|d| d.is_match);

    log::info!(
        "matched {}/{} rows: {} decisions across {} shows ({} rejections kept)",
        summary.rows_matched,
        summary.rows_total,
        summary.decisions,
        summary.shows_matched,
        rejections.len()
    );

    Ok(MatchRun {
        summary,
        decisions,
        rejections,
    })
}

fn evaluate_batch(index: &CatalogIndex, rows: &[CsvRow], options: &MatchOptions) -> Vec<Vec<MatchDecision>> {
    rows.par_iter()
        .map(|row| {
            if options.include_rejections {
                evaluate_row(index, options, row)
            } else {
                find_matches_for_row(index, options, row)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Show, ShowTitle};
    use uuid::Uuid;

    fn index() -> CatalogIndex {
        let id = Uuid::new_v4();
        CatalogIndex::build(
            vec![Show::new(id, "Se7en")
                .with_year(1995)
                .with_kind("movie")
                .with_producers(["New Line Cinema", "Cecchi Gori Pictures"])],
            vec![ShowTitle::new(id, "en", "Se7en"), ShowTitle::new(id, "fr", "Seven")],
        )
    }

    fn rows() -> Vec<CsvRow> {
        vec![
            CsvRow::new("Se7en", "Seven").with_producers("New Line Cinema, Cecchi Gori Pictures"),
            CsvRow::new("Se7en", "Seven").with_year(1996),
            CsvRow::new("Non-existent Show", ""),
        ]
    }

    #[test]
    fn run_splits_accepted_and_rejected() {
        let options = MatchOptions {
            include_rejections: true,
            ..MatchOptions::default()
        };
        let out = run(&index(), &rows(), &options).unwrap();
        assert_eq!(out.decisions.len(), 2);
        assert_eq!(out.rejections.len(), 2);
        assert!(out.rejections.iter().all(|d| !d.is_match));
        assert_eq!(out.summary.rows_total, 3);
        assert_eq!(out.summary.rows_matched, 1);
        assert_eq!(out.summary.rows_unmatched, 2);
    }

    #[test]
    fn rejections_dropped_by_default() {
        let out = run(&index(), &rows(), &MatchOptions::default()).unwrap();
        assert_eq!(out.decisions.len(), 2);
        assert!(out.rejections.is_empty());
    }

    #[test]
    fn dedicated_pool_gives_same_result() {
        let idx = index();
        let rows = rows();
        let shared = run(&idx, &rows, &MatchOptions::default()).unwrap();
        let pooled = run(
            &idx,
            &rows,
            &MatchOptions {
                threads: 2,
                ..MatchOptions::default()
            },
        )
        .unwrap();
        assert_eq!(shared.decisions, pooled.decisions);
        assert_eq!(shared.summary, pooled.summary);
    }
}
