//! Error types for route resolution.
//!
//! Every variant is fail-fast: the first error raised anywhere in a
//! resolution aborts the whole top-level call with no partial result.
//! Diagnostic-only conditions (a module without an `imports` field, a module
//! that never registers routes) are not errors and short-circuit to an empty
//! route sequence instead.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Debug, Error)]
pub enum ResolveError {
    // Program host errors
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse errors in '{path}': {}", diagnostics.join("; "))]
    Parse {
        path: PathBuf,
        diagnostics: Vec<String>,
    },

    // Module declaration shape
    #[error("no exported NgModule class found in '{path}'")]
    NoModule { path: PathBuf },

    #[error("found {count} exported NgModule classes in '{path}'; only one module per file is supported")]
    AmbiguousModule { path: PathBuf, count: usize },

    #[error("expected module '{expected}' but found '{found}' in '{path}'")]
    ModuleNameMismatch {
        expected: String,
        found: String,
        path: PathBuf,
    },

    // Route registration shape
    #[error("module '{module}' registers routes more than once; merge the registrations into a single call")]
    MultipleRegistrations { module: String },

    #[error("expected exactly one route configuration argument, got {found}")]
    RegistrationArity { found: usize },

    #[error("route configuration is not an array literal")]
    ConfigNotArray,

    #[error("route configuration contains no route objects")]
    NoRoutes,

    // Unsupported syntax
    #[error("unsupported syntax: {0}")]
    UnsupportedSyntax(String),

    // Symbol resolution
    #[error("identifier '{0}' has no value declaration")]
    UnresolvedIdentifier(String),

    #[error("variable '{0}' does not have an initial value")]
    MissingInitializer(String),

    #[error("only plain named imports are supported (import '{0}')")]
    UnsupportedImport(String),

    #[error("failed to get exported member '{name}' from '{path}'")]
    MissingExport { name: String, path: PathBuf },

    // Lazy references
    #[error("invalid lazy-load string '{0}'")]
    InvalidLazyReference(String),

    // Cycles in the module graph
    #[error("cyclic reference detected while resolving '{0}'")]
    Cycle(String),
}
