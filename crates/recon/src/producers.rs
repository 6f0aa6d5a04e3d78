//! Free-text producer lists.

use std::collections::HashSet;

/// Separators in priority order. Only the first one present in a string is
/// used to split it.
pub const SEPARATORS: [char; 4] = [',', ';', '|', '/'];

/// Split a producer string into trimmed, non-empty names.
///
/// The separator is the first of [`SEPARATORS`] found anywhere in the text;
/// mixed separators are not all honored (`"A, B; C"` gives `["A", "B; C"]`).
/// Without any of them the text is split on whitespace runs.
pub fn parse_producers<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    let text = match text.into() {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Vec::new(),
    };

    let pieces: Vec<&str> = match SEPARATORS.iter().find(|sep| text.contains(**sep)) {
        Some(sep) => text.split(*sep).collect(),
        None => text.split_whitespace().collect(),
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim, collapse internal whitespace to single spaces, lowercase.
pub fn normalize_producer_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// True when at least one normalized name appears in both lists.
/// Always false if either list is empty.
pub fn has_common_producer<A, B>(left: &[A], right: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    if left.is_empty() || right.is_empty() {
        return false;
    }

    let right_names: HashSet<String> = right
        .iter()
        .map(|p| normalize_producer_name(p.as_ref()))
        .collect();

    left.iter()
        .any(|p| right_names.contains(&normalize_producer_name(p.as_ref())))
}
