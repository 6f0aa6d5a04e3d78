//! CSV loading for the catalog and for incoming rows.
//!
//! Empty cells become absent values. Parsing is strict about ids and numbers
//! so bad input fails loudly here instead of silently never matching.

use std::str::FromStr;

use csv::StringRecord;

use crate::config::RowColumns;
use crate::error::ReconError;
use crate::model::{CsvRow, Show, ShowId, ShowTitle};

/// Separator of the producer list cell in the shows file.
pub const PRODUCER_LIST_SEPARATOR: char = '|';

struct Headers<'a> {
    input: &'a str,
    names: Vec<String>,
}

impl<'a> Headers<'a> {
    fn read(input: &'a str, reader: &mut csv::Reader<&[u8]>) -> Result<Self, ReconError> {
        let names = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        Ok(Self { input, names })
    }

    fn required(&self, column: &str) -> Result<usize, ReconError> {
        self.optional(column).ok_or_else(|| ReconError::MissingColumn {
            input: self.input.into(),
            column: column.into(),
        })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.names.iter().position(|h| h == column)
    }
}

fn reader(data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Cell text, `None` when the column is absent or the cell is blank.
fn cell(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn parse_cell<T: FromStr>(
    input: &str,
    record: &StringRecord,
    idx: Option<usize>,
    column: &str,
) -> Result<Option<T>, ReconError> {
    match cell(record, idx) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| ReconError::FieldParse {
            input: input.into(),
            line: line_of(record),
            column: column.into(),
            value: raw,
        }),
    }
}

fn parse_id(input: &str, record: &StringRecord, idx: usize, column: &str) -> Result<ShowId, ReconError> {
    parse_cell(input, record, Some(idx), column)?.ok_or_else(|| ReconError::FieldParse {
        input: input.into(),
        line: line_of(record),
        column: column.into(),
        value: String::new(),
    })
}

/// Load the shows file: `id,original_title,production_year,type,producers`.
/// `production_year`, `type`, and `producers` may be omitted.
pub fn load_shows(data: &str) -> Result<Vec<Show>, ReconError> {
    const INPUT: &str = "shows";
    let mut rdr = reader(data);
    let headers = Headers::read(INPUT, &mut rdr)?;

    let id_idx = headers.required("id")?;
    let title_idx = headers.required("original_title")?;
    let year_idx = headers.optional("production_year");
    let kind_idx = headers.optional("type");
    let producers_idx = headers.optional("producers");

    let mut shows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let producers = cell(&record, producers_idx)
            .map(|list| {
                list.split(PRODUCER_LIST_SEPARATOR)
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        shows.push(Show {
            id: parse_id(INPUT, &record, id_idx, "id")?,
            original_title: record.get(title_idx).unwrap_or("").to_string(),
            production_year: parse_cell(INPUT, &record, year_idx, "production_year")?,
            kind: cell(&record, kind_idx),
            producers,
        });
    }

    Ok(shows)
}

/// Load the localized titles file:
/// `show_id,language,title,season_number,episode_number,episode_name`.
/// The episode columns may be omitted.
pub fn load_titles(data: &str) -> Result<Vec<ShowTitle>, ReconError> {
    const INPUT: &str = "titles";
    let mut rdr = reader(data);
    let headers = Headers::read(INPUT, &mut rdr)?;

    let show_idx = headers.required("show_id")?;
    let language_idx = headers.required("language")?;
    let title_idx = headers.required("title")?;
    let season_idx = headers.optional("season_number");
    let episode_idx = headers.optional("episode_number");
    let episode_name_idx = headers.optional("episode_name");

    let mut titles = Vec::new();
    for record in rdr.records() {
        let record = record?;
        titles.push(ShowTitle {
            show_id: parse_id(INPUT, &record, show_idx, "show_id")?,
            language: record.get(language_idx).unwrap_or("").to_string(),
            title: record.get(title_idx).unwrap_or("").to_string(),
            season_number: parse_cell(INPUT, &record, season_idx, "season_number")?,
            episode_number: parse_cell(INPUT, &record, episode_idx, "episode_number")?,
            episode_name: cell(&record, episode_name_idx),
        });
    }

    Ok(titles)
}

/// Load incoming rows using the configured header names. Only the original
/// title column is required; any other mapped column may be missing.
pub fn load_rows(data: &str, columns: &RowColumns) -> Result<Vec<CsvRow>, ReconError> {
    const INPUT: &str = "rows";
    let mut rdr = reader(data);
    let headers = Headers::read(INPUT, &mut rdr)?;

    let original_idx = Some(headers.required(&columns.original_title)?);
    let translated_idx = headers.optional(&columns.translated_title);
    let producers_idx = headers.optional(&columns.producers);
    let year_idx = headers.optional(&columns.production_year);
    let kind_idx = headers.optional(&columns.kind);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(CsvRow {
            original_title: cell(&record, original_idx),
            translated_title: cell(&record, translated_idx),
            producers: cell(&record, producers_idx),
            production_year: parse_cell(INPUT, &record, year_idx, &columns.production_year)?,
            kind: cell(&record, kind_idx),
        });
    }

    log::debug!("loaded {} incoming rows", rows.len());
    Ok(rows)
}
