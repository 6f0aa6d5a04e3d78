//! Run output: JSON report and the human-readable listing.

use std::io::{self, Write};

use serde::Serialize;
use showmatch_recon::{CatalogIndex, CsvRow, MatchDecision, MatchRun, MatchSummary, ShowTitle};

#[derive(Debug, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// `{ meta, summary, decisions, rejections? }`
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub meta: ReportMeta,
    #[serde(flatten)]
    pub run: &'a MatchRun,
}

impl<'a> RunReport<'a> {
    pub fn new(config_name: &str, run: &'a MatchRun) -> Self {
        Self {
            meta: ReportMeta {
                config_name: config_name.to_string(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            run,
        }
    }
}

pub fn summary_line(config_name: &str, s: &MatchSummary) -> String {
    format!(
        "'{}': {} rows, {} matched, {} unmatched, {} decisions across {} shows",
        config_name, s.rows_total, s.rows_matched, s.rows_unmatched, s.decisions, s.shows_matched,
    )
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

fn episode_label(title: &ShowTitle) -> Option<String> {
    let (season, episode) = (title.season_number?, title.episode_number?);
    Some(match title.episode_name.as_deref() {
        Some(name) => format!("S{season:02}E{episode:02} \"{name}\""),
        None => format!("S{season:02}E{episode:02}"),
    })
}

/// Decisions grouped under their row header. Consecutive decisions for the
/// same row share one header, which holds for engine output since it keeps
/// input order.
pub fn render_human<W: Write>(out: &mut W, index: &CatalogIndex, decisions: &[MatchDecision]) -> io::Result<()> {
    let mut current: Option<&CsvRow> = None;

    for d in decisions {
        if current != Some(&d.row) {
            if current.is_some() {
                writeln!(out)?;
            }
            writeln!(
                out,
                "{} / {}",
                or_dash(d.row.original_title.as_deref()),
                or_dash(d.row.translated_title.as_deref())
            )?;
            current = Some(&d.row);
        }

        write!(out, "  [{}] {}", d.title.language, d.title.title)?;
        if let Some(label) = episode_label(&d.title) {
            write!(out, " {label}")?;
        }
        if !d.is_match {
            write!(out, "  (rejected: {})", d.reason)?;
        }
        writeln!(out)?;

        if let Some(show) = index.show(&d.title.show_id) {
            let year = show
                .production_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string());
            let producers = if show.producers.is_empty() {
                "-".to_string()
            } else {
                show.producers.join(", ")
            };
            writeln!(out, "      {} ({year}) | {producers}", show.original_title)?;
        }
    }

    Ok(())
}
