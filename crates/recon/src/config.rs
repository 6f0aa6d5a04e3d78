use std::collections::HashSet;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    pub name: String,
    pub catalog: CatalogFiles,
    pub input: InputConfig,
    #[serde(default)]
    pub options: MatchOptions,
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Reference catalog files. Paths are relative to the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFiles {
    pub shows: String,
    pub titles: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub rows: String,
    #[serde(default)]
    pub columns: RowColumns,
}

/// Header names of the external rows file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RowColumns {
    pub original_title: String,
    pub translated_title: String,
    pub producers: String,
    pub production_year: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for RowColumns {
    fn default() -> Self {
        Self {
            original_title: "original_title".into(),
            translated_title: "translated_title".into(),
            producers: "producers".into(),
            production_year: "production_year".into(),
            kind: "type".into(),
        }
    }
}

impl RowColumns {
    fn names(&self) -> [(&'static str, &str); 5] {
        [
            ("original_title", self.original_title.as_str()),
            ("translated_title", self.translated_title.as_str()),
            ("producers", self.producers.as_str()),
            ("production_year", self.production_year.as_str()),
            ("type", self.kind.as_str()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Engine and report knobs. Defaults reproduce the plain matching rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchOptions {
    /// Worker threads for batch matching. 0 uses the global rayon pool.
    pub threads: usize,
    /// Symmetric-containment scan over every localized title.
    pub substring_scan: bool,
    /// Normalized keys shorter than this skip the containment scan.
    pub min_scan_key_len: usize,
    /// Keep rejected decisions alongside accepted ones.
    pub include_rejections: bool,
    /// Treat rows with no accepted decision as a failed run.
    pub fail_on_unmatched: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            substring_scan: true,
            min_scan_key_len: 0,
            include_rejections: false,
            fail_on_unmatched: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        for (key, path) in [
            ("catalog.shows", &self.catalog.shows),
            ("catalog.titles", &self.catalog.titles),
            ("input.rows", &self.input.rows),
        ] {
            if path.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{key}: file path is empty")));
            }
        }

        let mut seen = HashSet::new();
        for (field, header) in self.input.columns.names() {
            if header.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "input.columns.{field}: column name is empty"
                )));
            }
            if !seen.insert(header) {
                return Err(ReconError::ConfigValidation(format!(
                    "input.columns.{field}: column '{header}' is mapped more than once"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name = "Nightly catalog sync"

[catalog]
shows = "shows.csv"
titles = "show_titles.csv"

[input]
rows = "incoming.csv"
"#;

    #[test]
    fn parse_minimal_uses_defaults() {
        let config = MatchConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.name, "Nightly catalog sync");
        assert_eq!(config.catalog.shows, "shows.csv");
        assert_eq!(config.input.columns.kind, "type");
        assert_eq!(config.options.threads, 0);
        assert!(config.options.substring_scan);
        assert_eq!(config.options.min_scan_key_len, 0);
        assert!(!config.options.include_rejections);
        assert!(!config.options.fail_on_unmatched);
    }

    #[test]
    fn parse_columns_and_options() {
        let input = format!(
            r#"{MINIMAL}
[input.columns]
original_title = "Titre original"
type = "Kind"

[options]
threads = 4
substring_scan = false
min_scan_key_len = 3
fail_on_unmatched = true
"#
        );
        let config = MatchConfig::from_toml(&input).unwrap();
        assert_eq!(config.input.columns.original_title, "Titre original");
        assert_eq!(config.input.columns.kind, "Kind");
        // Unset columns keep their defaults
        assert_eq!(config.input.columns.producers, "producers");
        assert_eq!(config.options.threads, 4);
        assert!(!config.options.substring_scan);
        assert_eq!(config.options.min_scan_key_len, 3);
        assert!(config.options.fail_on_unmatched);
    }

    #[test]
    fn reject_unknown_option() {
        let input = format!("{MINIMAL}\n[options]\nfuzzy = true\n");
        let err = MatchConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_missing_catalog() {
        let err = MatchConfig::from_toml("name = \"x\"\n[input]\nrows = \"r.csv\"\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_empty_path() {
        let input = MINIMAL.replace("\"incoming.csv\"", "\"  \"");
        let err = MatchConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("input.rows"));
    }

    #[test]
    fn reject_duplicate_column() {
        let input = format!("{MINIMAL}\n[input.columns]\ntranslated_title = \"original_title\"\n");
        let err = MatchConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("mapped more than once"));
    }

    #[test]
    fn reject_empty_name() {
        let input = MINIMAL.replace("Nightly catalog sync", "");
        let err = MatchConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }
}
