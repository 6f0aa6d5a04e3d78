//! CLI Exit Code Registry
//!
//! Single source of truth for `showmatch` exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args, missing file)             |
//! | 3    | Invalid run config (parse or validation)             |
//! | 4    | Runtime error (unreadable input, bad CSV, I/O)       |
//! | 5    | Rows without a match and `fail_on_unmatched` is set  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use showmatch_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Matching (3-9)
// =============================================================================

/// Config file failed to parse or validate.
pub const EXIT_MATCH_INVALID_CONFIG: u8 = 3;

/// Input could not be read or loaded, or the worker pool failed to start.
pub const EXIT_MATCH_RUNTIME: u8 = 4;

/// At least one row produced no accepted decision (`fail_on_unmatched`).
pub const EXIT_MATCH_UNMATCHED: u8 = 5;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_MATCH_INVALID_CONFIG,
        ReconError::MissingColumn { .. }
        | ReconError::FieldParse { .. }
        | ReconError::ThreadPool(_)
        | ReconError::Io(_) => EXIT_MATCH_RUNTIME,
    }
}
