//! Title comparison keys.

/// Reduce a title to its comparison key: trimmed, lowercased, and stripped of
/// everything that is not an ASCII letter or digit. Non-ASCII characters are
/// dropped, never transliterated, so `"Amélie"` becomes `"amlie"`.
///
/// An empty input yields an empty key. Applying it twice changes nothing.
pub fn normalize_title(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_and_punctuation() {
        assert_eq!(normalize_title("Garfield: The Movie"), "garfieldthemovie");
        assert_eq!(normalize_title("GARFIELD THE MOVIE"), "garfieldthemovie");
    }

    #[test]
    fn quoted_and_bracketed_titles() {
        assert_eq!(normalize_title("\"The Office\""), "theoffice");
        assert_eq!(normalize_title("[REC]"), "rec");
        assert_eq!(normalize_title("M*A*S*H"), "mash");
        assert_eq!(normalize_title("2001: A Space Odyssey"), "2001aspaceodyssey");
    }

    #[test]
    fn non_ascii_is_removed() {
        assert_eq!(normalize_title("Le Fabuleux Destin d'Amélie Poulain"), "lefabuleuxdestindamliepoulain");
        assert_eq!(normalize_title("千と千尋の神隠し (Spirited Away)"), "spiritedaway");
        assert_eq!(normalize_title("千と千尋の神隠し"), "");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("   \t "), "");
    }

    #[test]
    fn idempotent_on_samples() {
        for s in ["Se7en", "  The 100 ", "Monty Python's Flying Circus", "É-Ö", ""] {
            let once = normalize_title(s);
            assert_eq!(normalize_title(&once), once);
        }
    }
}
