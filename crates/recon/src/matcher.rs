use std::collections::HashSet;

use rayon::prelude::*;

use crate::acceptance::assess_with_producers;
use crate::config::MatchOptions;
use crate::index::CatalogIndex;
use crate::model::{CsvRow, MatchDecision, Show, Verdict};
use crate::normalize::normalize_title;
use crate::producers::parse_producers;

/// Shows a row might refer to, before acceptance checks.
///
/// Original title first, then translated title; blank titles are skipped.
/// Each title contributes exact normalized-key hits on show original titles,
/// then every show owning a localized title whose key contains, or is
/// contained in, the row's key. Duplicates are dropped, first-seen order kept.
pub fn find_candidates<'a>(
    index: &'a CatalogIndex,
    options: &MatchOptions,
    row: &CsvRow,
) -> Vec<&'a Show> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let titles = [row.original_title.as_deref(), row.translated_title.as_deref()];
    for title in titles.into_iter().flatten() {
        if title.trim().is_empty() {
            continue;
        }
        for show in shows_for_title(index, options, title) {
            if seen.insert(show.id) {
                candidates.push(show);
            }
        }
    }

    candidates
}

fn shows_for_title<'a>(index: &'a CatalogIndex, options: &MatchOptions, title: &str) -> Vec<&'a Show> {
    let key = normalize_title(title);
    let mut shows: Vec<&Show> = index.shows_with_key(&key).collect();

    // An empty key is contained in every title, so it pulls in the whole
    // catalog unless min_scan_key_len says otherwise.
    if options.substring_scan && key.len() >= options.min_scan_key_len {
        shows.extend(
            index
                .title_keys()
                .filter(|(title_key, _)| title_key.contains(key.as_str()) || key.contains(title_key))
                .filter_map(|(_, id)| index.show(id)),
        );
    }

    shows
}

/// Every decision for a row: one per localized title of each candidate,
/// accepted or rejected, in candidate order.
pub fn evaluate_row(index: &CatalogIndex, options: &MatchOptions, row: &CsvRow) -> Vec<MatchDecision> {
    decide(index, options, row, true)
}

/// Accepted decisions for a row.
pub fn find_matches_for_row(
    index: &CatalogIndex,
    options: &MatchOptions,
    row: &CsvRow,
) -> Vec<MatchDecision> {
    decide(index, options, row, false)
}

/// Accepted decisions for a batch, rows evaluated in parallel on the current
/// rayon pool. Output is grouped by row in input order.
pub fn find_matches(index: &CatalogIndex, options: &MatchOptions, rows: &[CsvRow]) -> Vec<MatchDecision> {
    rows.par_iter()
        .flat_map_iter(|row| find_matches_for_row(index, options, row))
        .collect()
}

fn decide(index: &CatalogIndex, options: &MatchOptions, row: &CsvRow, keep_rejected: bool) -> Vec<MatchDecision> {
    let candidates = find_candidates(index, options, row);
    if candidates.is_empty() {
        return Vec::new();
    }

    let row_producers = parse_producers(row.producers.as_deref());
    let mut decisions = Vec::new();

    for show in candidates {
        let verdict = assess_with_producers(row, &row_producers, show);
        if let Verdict::Rejected(ref reason) = verdict {
            log::trace!(
                "row '{}' rejected '{}' ({}): {reason}",
                row.original_title.as_deref().unwrap_or(""),
                show.original_title,
                show.id
            );
            if !keep_rejected {
                continue;
            }
        }

        decisions.extend(
            index
                .titles_for(&show.id)
                .iter()
                .map(|title| MatchDecision::from_verdict(row, title, &verdict)),
        );
    }

    decisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShowTitle;
    use uuid::Uuid;

    struct Fixture {
        index: CatalogIndex,
        garfield: Uuid,
        matrix: Uuid,
    }

    fn fixture() -> Fixture {
        let garfield = Uuid::new_v4();
        let matrix = Uuid::new_v4();
        let shows = vec![
            Show::new(garfield, "Garfield: The Movie")
                .with_year(2004)
                .with_kind("movie")
                .with_producers(["20th Century Fox", "Davis Entertainment"]),
            Show::new(matrix, "The Matrix")
                .with_year(1999)
                .with_kind("movie")
                .with_producers(["Warner Bros.", "Village Roadshow Pictures"]),
        ];
        let titles = vec![
            ShowTitle::new(garfield, "en", "Garfield: The Movie"),
            ShowTitle::new(garfield, "fr", "Garfield, le film"),
            ShowTitle::new(matrix, "en", "The Matrix"),
        ];
        Fixture {
            index: CatalogIndex::build(shows, titles),
            garfield,
            matrix,
        }
    }

    fn matrix_row() -> CsvRow {
        CsvRow::new("The Matrix", "Matrix")
            .with_producers("Warner Bros.; Village Roadshow Pictures")
            .with_year(1999)
            .with_kind("movie")
    }

    #[test]
    fn exact_match_yields_one_decision_per_title() {
        let fx = fixture();
        let opts = MatchOptions::default();
        let decisions = find_matches_for_row(&fx.index, &opts, &matrix_row());
        assert_eq!(decisions.len(), 1);
        assert!(decisions[0].is_match);
        assert_eq!(decisions[0].title.show_id, fx.matrix);
        assert_eq!(decisions[0].reason, "Match found");
    }

    #[test]
    fn partial_title_found_by_containment() {
        let fx = fixture();
        let opts = MatchOptions::default();
        let row = CsvRow::new("Garfield", "Garfield").with_year(2004);
        let decisions = find_matches_for_row(&fx.index, &opts, &row);
        let langs: Vec<&str> = decisions.iter().map(|d| d.title.language.as_str()).collect();
        assert_eq!(langs, vec!["en", "fr"]);
        assert!(decisions.iter().all(|d| d.title.show_id == fx.garfield));
    }

    #[test]
    fn failed_checks_yield_nothing() {
        let fx = fixture();
        let opts = MatchOptions::default();
        for row in [
            matrix_row().with_year(2000),
            matrix_row().with_kind("series"),
            matrix_row().with_producers("Totally Unrelated Studio"),
        ] {
            assert!(find_matches_for_row(&fx.index, &opts, &row).is_empty());
        }
    }

    #[test]
    fn padded_type_tag_does_not_match() {
        let fx = fixture();
        let opts = MatchOptions::default();
        let row = matrix_row().with_kind(" movie ");
        assert!(find_matches_for_row(&fx.index, &opts, &row).is_empty());

        let all = evaluate_row(&fx.index, &opts, &row);
        assert_eq!(all.len(), 1);
        assert!(all[0].reason.starts_with("Type mismatch"));
    }

    #[test]
    fn rejections_are_visible_to_evaluate_row() {
        let fx = fixture();
        let opts = MatchOptions::default();
        let decisions = evaluate_row(&fx.index, &opts, &matrix_row().with_year(2000));
        assert_eq!(decisions.len(), 1);
        assert!(!decisions[0].is_match);
        assert!(decisions[0].reason.contains("year"));
    }

    #[test]
    fn blank_titles_have_no_candidates() {
        let fx = fixture();
        let opts = MatchOptions::default();
        let row = CsvRow {
            original_title: Some("   ".into()),
            translated_title: None,
            ..matrix_row()
        };
        assert!(find_candidates(&fx.index, &opts, &row).is_empty());
        assert!(evaluate_row(&fx.index, &opts, &row).is_empty());
    }

    #[test]
    fn candidates_deduplicated_in_first_seen_order() {
        let fx = fixture();
        let opts = MatchOptions::default();
        let row = CsvRow::new("The Matrix", "Garfield, le film");
        let ids: Vec<Uuid> = find_candidates(&fx.index, &opts, &row).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![fx.matrix, fx.garfield]);
    }

    #[test]
    fn substring_scan_can_be_disabled() {
        let fx = fixture();
        let opts = MatchOptions {
            substring_scan: false,
            ..MatchOptions::default()
        };
        assert!(find_candidates(&fx.index, &opts, &CsvRow::new("Garfield", "")).is_empty());
        assert_eq!(find_candidates(&fx.index, &opts, &matrix_row()).len(), 1);
    }

    #[test]
    fn empty_key_matches_everything_unless_guarded() {
        let fx = fixture();
        let row = CsvRow::new("千と千尋", "");
        let opts = MatchOptions::default();
        assert_eq!(find_candidates(&fx.index, &opts, &row).len(), 2);

        let guarded = MatchOptions {
            min_scan_key_len: 1,
            ..MatchOptions::default()
        };
        assert!(find_candidates(&fx.index, &guarded, &row).is_empty());
    }

    #[test]
    fn accepted_show_without_titles_emits_nothing() {
        let id = Uuid::new_v4();
        let index = CatalogIndex::build(vec![Show::new(id, "Orphan")], vec![]);
        let opts = MatchOptions::default();
        let row = CsvRow::new("Orphan", "");
        assert_eq!(find_candidates(&index, &opts, &row).len(), 1);
        assert!(find_matches_for_row(&index, &opts, &row).is_empty());
    }

    #[test]
    fn batch_equals_concatenated_rows() {
        let fx = fixture();
        let opts = MatchOptions::default();
        let rows = vec![
            matrix_row(),
            CsvRow::new("Garfield", "Garfield"),
            matrix_row().with_year(2000),
        ];
        let expected: Vec<MatchDecision> = rows
            .iter()
            .flat_map(|r| find_matches_for_row(&fx.index, &opts, r))
            .collect();
        assert_eq!(find_matches(&fx.index, &opts, &rows), expected);
    }
}
