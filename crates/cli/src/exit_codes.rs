//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success (for `match`: the names matched)             |
//! | 1    | General error; for `match`, the names did not match  |
//! | 2    | CLI usage error (bad args, unreadable input file)    |
//! | 3    | Invalid run config                                   |
//! | 4    | Runtime failure (ledger unreadable, output not written) |
//! | 5    | Partial run: one or more sources failed              |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant with a doc comment naming what triggers it
//! 2. Update the table above
//! 3. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// match
// =============================================================================

/// The two names did not match. Like `grep(1)`, exit 1 means "no match."
pub const EXIT_NO_MATCH: u8 = 1;

// =============================================================================
// scan / validate (3-5)
// =============================================================================

/// Config could not be parsed or failed validation.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Ledger unreadable, config unreadable, or report could not be written.
pub const EXIT_RUNTIME: u8 = 4;

/// At least one source failed; the report covers the rest.
pub const EXIT_PARTIAL: u8 = 5;
