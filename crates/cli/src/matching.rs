//! `showmatch run` / `showmatch validate`: config-driven catalog matching.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use showmatch_recon::loader::{load_rows, load_shows, load_titles};
use showmatch_recon::{CatalogIndex, MatchConfig};

use crate::exit_codes::EXIT_MATCH_UNMATCHED;
use crate::report::{render_human, summary_line, RunReport};
use crate::CliError;

fn read_config(config_path: &Path) -> Result<MatchConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::args(format!("cannot read config {}: {e}", config_path.display()))
            .with_hint("pass the path to a .match.toml file")
    })?;
    MatchConfig::from_toml(&config_str).map_err(CliError::recon)
}

/// Read one input file, resolved against the config file's directory.
fn read_input(base_dir: &Path, file: &str) -> Result<String, CliError> {
    let path = base_dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))
}

pub fn cmd_run(config_path: PathBuf, json_output: bool, output_file: Option<PathBuf>) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let shows = load_shows(&read_input(base_dir, &config.catalog.shows)?).map_err(CliError::recon)?;
    let titles = load_titles(&read_input(base_dir, &config.catalog.titles)?).map_err(CliError::recon)?;
    let rows = load_rows(&read_input(base_dir, &config.input.rows)?, &config.input.columns)
        .map_err(CliError::recon)?;
    log::info!(
        "loaded {} shows, {} titles, {} rows for '{}'",
        shows.len(),
        titles.len(),
        rows.len(),
        config.name
    );

    let index = CatalogIndex::build(shows, titles);
    let result = showmatch_recon::run(&index, &rows, &config.options).map_err(CliError::recon)?;

    if json_output || output_file.is_some() {
        let report = RunReport::new(&config.name, &result);
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }

        if json_output {
            println!("{json_str}");
        }
    }

    if !json_output {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        render_human(&mut handle, &index, &result.decisions)
            .and_then(|()| handle.flush())
            .map_err(|e| CliError::io(e.to_string()))?;
    }

    eprintln!("{}", summary_line(&config.name, &result.summary));

    let unmatched = result.summary.rows_unmatched;
    if config.options.fail_on_unmatched && unmatched > 0 {
        return Err(CliError::new(
            EXIT_MATCH_UNMATCHED,
            format!("{unmatched} row(s) without a match (fail_on_unmatched)"),
        ));
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    eprintln!(
        "valid: '{}' matching {} against {} / {}",
        config.name, config.input.rows, config.catalog.shows, config.catalog.titles,
    );
    Ok(())
}
