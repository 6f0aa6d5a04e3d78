use std::collections::HashMap;

use crate::model::{Show, ShowId, ShowTitle};
use crate::normalize::normalize_title;

/// Read-only lookups over the reference catalog.
///
/// Built once, single-threaded, then shared by reference across workers.
/// Duplicate show ids are the caller's responsibility: the last show with a
/// given id wins.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    shows_by_id: HashMap<ShowId, Show>,
    titles_by_show: HashMap<ShowId, Vec<ShowTitle>>,
    shows_by_key: HashMap<String, Vec<ShowId>>,
    /// Normalized key of every title record, in input order.
    title_keys: Vec<(String, ShowId)>,
}

impl CatalogIndex {
    pub fn build(shows: Vec<Show>, titles: Vec<ShowTitle>) -> Self {
        let mut shows_by_id: HashMap<ShowId, Show> = HashMap::with_capacity(shows.len());
        let mut shows_by_key: HashMap<String, Vec<ShowId>> = HashMap::new();
        let mut duplicates = 0usize;

        for show in shows {
            let ids = shows_by_key
                .entry(normalize_title(&show.original_title))
                .or_default();
            if !ids.contains(&show.id) {
                ids.push(show.id);
            }
            if let Some(previous) = shows_by_id.insert(show.id, show) {
                duplicates += 1;
                log::warn!(
                    "duplicate show id {}: '{}' replaced by a later entry",
                    previous.id,
                    previous.original_title
                );
            }
        }

        let mut titles_by_show: HashMap<ShowId, Vec<ShowTitle>> = HashMap::new();
        let mut title_keys = Vec::with_capacity(titles.len());
        let mut dangling = 0usize;

        for title in titles {
            if !shows_by_id.contains_key(&title.show_id) {
                dangling += 1;
            }
            title_keys.push((normalize_title(&title.title), title.show_id));
            titles_by_show.entry(title.show_id).or_default().push(title);
        }

        if dangling > 0 {
            log::debug!("{dangling} title record(s) reference no known show");
        }
        log::debug!(
            "catalog index: {} shows ({} duplicate ids), {} distinct title keys, {} localized titles",
            shows_by_id.len(),
            duplicates,
            shows_by_key.len(),
            title_keys.len()
        );

        Self {
            shows_by_id,
            titles_by_show,
            shows_by_key,
            title_keys,
        }
    }

    pub fn show(&self, id: &ShowId) -> Option<&Show> {
        self.shows_by_id.get(id)
    }

    /// Title records of a show, in input order. Empty for unknown ids.
    pub fn titles_for(&self, id: &ShowId) -> &[ShowTitle] {
        self.titles_by_show.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shows whose normalized original title equals `key` exactly.
    pub fn shows_with_key<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Show> + 'a {
        self.shows_by_key
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.shows_by_id.get(id))
    }

    /// `(normalized title, show id)` for every title record, in input order.
    pub fn title_keys(&self) -> impl Iterator<Item = (&str, &ShowId)> + '_ {
        self.title_keys.iter().map(|(key, id)| (key.as_str(), id))
    }

    pub fn show_count(&self) -> usize {
        self.shows_by_id.len()
    }

    pub fn title_count(&self) -> usize {
        self.title_keys.len()
    }
}
