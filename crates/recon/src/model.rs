use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ShowId = Uuid;

// ---------------------------------------------------------------------------
// Reference catalog
// ---------------------------------------------------------------------------

/// A catalog entry (film or series). Identity is `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub original_title: String,
    pub production_year: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub producers: Vec<String>,
}

impl Show {
    pub fn new(id: ShowId, original_title: impl Into<String>) -> Self {
        Self {
            id,
            original_title: original_title.into(),
            production_year: None,
            kind: None,
            producers: Vec::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.production_year = Some(year);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_producers<I, S>(mut self, producers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.producers = producers.into_iter().map(Into::into).collect();
        self
    }
}

impl PartialEq for Show {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Show {}

impl Hash for Show {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One language- or episode-specific title of a [`Show`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowTitle {
    pub show_id: ShowId,
    pub language: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_name: Option<String>,
}

impl ShowTitle {
    pub fn new(show_id: ShowId, language: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            show_id,
            language: language.into(),
            title: title.into(),
            season_number: None,
            episode_number: None,
            episode_name: None,
        }
    }

    pub fn with_episode(mut self, season: u32, episode: u32, name: impl Into<String>) -> Self {
        self.season_number = Some(season);
        self.episode_number = Some(episode);
        self.episode_name = Some(name.into());
        self
    }
}

// ---------------------------------------------------------------------------
// External input
// ---------------------------------------------------------------------------

/// An incoming row to reconcile against the catalog. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsvRow {
    pub original_title: Option<String>,
    pub translated_title: Option<String>,
    /// Free text; separator is detected at match time.
    pub producers: Option<String>,
    pub production_year: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl CsvRow {
    pub fn new(original_title: impl Into<String>, translated_title: impl Into<String>) -> Self {
        Self {
            original_title: Some(original_title.into()),
            translated_title: Some(translated_title.into()),
            ..Self::default()
        }
    }

    pub fn with_producers(mut self, producers: impl Into<String>) -> Self {
        self.producers = Some(producers.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.production_year = Some(year);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Why a candidate show failed the acceptance test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Rejection {
    YearMismatch { row: i32, show: i32 },
    TypeMismatch { row: String, show: String },
    NoCommonProducer,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearMismatch { row, show } => {
                write!(f, "Production year mismatch: row {row}, show {show}")
            }
            Self::TypeMismatch { row, show } => {
                write!(f, "Type mismatch: row '{row}', show '{show}'")
            }
            Self::NoCommonProducer => write!(f, "No common producer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

pub const MATCH_FOUND: &str = "Match found";

/// Verdict pairing one input row with one catalog title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchDecision {
    pub row: CsvRow,
    pub title: ShowTitle,
    pub is_match: bool,
    pub reason: String,
}

impl MatchDecision {
    pub fn accepted(row: CsvRow, title: ShowTitle) -> Self {
        Self {
            row,
            title,
            is_match: true,
            reason: MATCH_FOUND.to_string(),
        }
    }

    pub fn rejected(row: CsvRow, title: ShowTitle, reason: impl Into<String>) -> Self {
        Self {
            row,
            title,
            is_match: false,
            reason: reason.into(),
        }
    }

    pub(crate) fn from_verdict(row: &CsvRow, title: &ShowTitle, verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Accepted => Self::accepted(row.clone(), title.clone()),
            Verdict::Rejected(r) => Self::rejected(row.clone(), title.clone(), r.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub rows_total: usize,
    pub rows_matched: usize,
    pub rows_unmatched: usize,
    pub decisions: usize,
    pub shows_matched: usize,
}
