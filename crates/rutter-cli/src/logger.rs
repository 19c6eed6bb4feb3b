//! Logging setup for the CLI.
//!
//! Structured logging via the `tracing` ecosystem. Log lines go to stderr so
//! that the route dump on stdout stays machine-readable.
//!
//! The level is picked in this order:
//! 1. `--verbose`: debug level for rutter crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG` environment variable
//! 4. Default: info level for rutter crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once at process start, before any logging happens.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("rutter_resolver=debug,rutter_cli=debug")
    } else if quiet {
        EnvFilter::new("rutter_resolver=error,rutter_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rutter_resolver=info,rutter_cli=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
