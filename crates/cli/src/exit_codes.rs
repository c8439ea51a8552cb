//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                           |
//! |------|---------------------------------------------------|
//! | 0    | Success                                           |
//! | 1    | Differences found (only with `run --strict`)      |
//! | 2    | CLI usage error (bad args)                        |
//! | 3    | Config could not be parsed or failed validation   |
//! | 4    | Runtime error (unreadable input, unwritable output) |
//! | 5    | Export could not be parsed (missing column, bad cell) |

use reeldiff_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Differences found. Like `diff(1)`, exit 1 means "catalogs differ."
/// Only returned when `--strict` is set.
pub const EXIT_DIFFERENCES: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Invalid config (TOML parse error or validation failure).
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime error: file IO, JSON serialization.
pub const EXIT_RUNTIME: u8 = 4;

/// Parse error reading an export or mapping CSV.
pub const EXIT_PARSE: u8 = 5;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::MissingColumn { .. } | ReconError::FieldParse { .. } => EXIT_PARSE,
        ReconError::Io(_) => EXIT_RUNTIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_DIFFERENCES,
            EXIT_USAGE,
            EXIT_INVALID_CONFIG,
            EXIT_RUNTIME,
            EXIT_PARSE,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn engine_errors_map_by_kind() {
        assert_eq!(recon_exit_code(&ReconError::ConfigParse("x".into())), EXIT_INVALID_CONFIG);
        assert_eq!(
            recon_exit_code(&ReconError::MissingColumn {
                source: "imdb".into(),
                column: "Const".into(),
            }),
            EXIT_PARSE
        );
        assert_eq!(recon_exit_code(&ReconError::Io("boom".into())), EXIT_RUNTIME);
    }
}
