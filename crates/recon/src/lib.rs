//! Catalog title reconciliation engine.
//!
//! Pure engine crate: receives the reference catalog and a batch of incoming
//! rows, returns match decisions. Reading files and rendering reports belong
//! to the caller; `loader` only parses CSV text handed to it.

pub mod acceptance;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod producers;
pub mod summary;

pub use acceptance::assess;
pub use config::{MatchConfig, MatchOptions};
pub use engine::{run, MatchRun};
pub use error::ReconError;
pub use index::CatalogIndex;
pub use matcher::{evaluate_row, find_candidates, find_matches, find_matches_for_row};
pub use model::{CsvRow, MatchDecision, MatchSummary, Rejection, Show, ShowId, ShowTitle, Verdict};
pub use normalize::normalize_title;
pub use producers::{has_common_producer, normalize_producer_name, parse_producers};
