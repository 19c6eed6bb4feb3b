//! CLI error handling.
//!
//! Resolver and I/O failures are collected into one flat [`CliError`] and
//! converted to a miette report at the top of `main` for readable terminal
//! output.

use miette::Report;
use rutter_resolver::ResolveError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Route resolution failed
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`CliError`] as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a [`CliError`] to a miette report.
pub fn cli_error_to_report(err: CliError) -> Report {
    miette::miette!("{}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_converts_via_from() {
        let err: CliError = ResolveError::NoRoutes.into();
        assert!(matches!(err, CliError::Resolve(_)));
        assert!(err.to_string().contains("Resolution error"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CliError = io.into();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn report_keeps_the_message() {
        let report = cli_error_to_report(CliError::Resolve(ResolveError::NoRoutes));
        assert!(report.to_string().contains("Resolution error"));
    }
}
