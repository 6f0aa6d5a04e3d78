// showmatch CLI - reconcile incoming title rows against a reference catalog

mod exit_codes;
mod matching;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use exit_codes::{recon_exit_code, EXIT_ERROR, EXIT_MATCH_RUNTIME, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "showmatch")]
#[command(about = "Reconcile external title rows against a show catalog")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match the configured rows against the catalog
    #[command(after_help = "\
Examples:
  showmatch run catalog.match.toml
  showmatch run catalog.match.toml --json
  showmatch run catalog.match.toml --output decisions.json
  RUST_LOG=showmatch_recon=trace showmatch run catalog.match.toml")]
    Run {
        /// Path to the .match.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of the human report
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a run config without loading any data
    #[command(after_help = "\
Examples:
  showmatch validate catalog.match.toml")]
    Validate {
        /// Path to the .match.toml config file
        config: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { config, json, output } => matching::cmd_run(config, json, output),
        Commands::Validate { config } => matching::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_MATCH_RUNTIME, msg)
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Engine error with its registry exit code.
    pub fn recon(err: showmatch_recon::ReconError) -> Self {
        Self::new(recon_exit_code(&err), err.to_string())
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
