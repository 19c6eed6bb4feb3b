//! Command-line interface definition.
//!
//! A single invocation form: `rutter <MODULE> [-o <FILE>]`. The module path is
//! interpreted relative to the current working directory. Historically the
//! tool used `-v` for the version flag, so the built-in short flag is
//! replaced and `--verbose` keeps only its long form.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Rutter - static route extraction for Angular-style module trees
#[derive(Parser, Debug)]
#[command(
    name = "rutter",
    version,
    disable_version_flag = true,
    about = "Extract router configuration from an NgModule file without running it",
    long_about = "Rutter statically resolves the route tree registered by an Angular-style\n\
                  module: it locates the exported @NgModule class, follows RouterModule\n\
                  registrations through constants, spreads and imported modules, and\n\
                  expands 'path#Module' lazy references recursively."
)]
pub struct Cli {
    /// Path to the module file, relative to the current directory
    pub module: PathBuf,

    /// Write the routes as JSON to this file instead of dumping to stdout
    ///
    /// Missing parent directories are created. The file always ends with a
    /// trailing newline.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_module_path_and_out_file() {
        let cli = Cli::try_parse_from(["rutter", "src/app.module.ts", "-o", "routes.json"])
            .expect("parse failed");
        assert_eq!(cli.module, PathBuf::from("src/app.module.ts"));
        assert_eq!(cli.out, Some(PathBuf::from("routes.json")));
    }

    #[test]
    fn module_path_is_required() {
        assert!(Cli::try_parse_from(["rutter"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["rutter", "app.module.ts", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn verbose_has_no_short_flag() {
        // -v is the version flag, so it must not parse as verbose.
        let result = Cli::try_parse_from(["rutter", "app.module.ts", "-v"]);
        assert_eq!(
            result.expect_err("version flag should exit parsing").kind(),
            clap::error::ErrorKind::DisplayVersion
        );
    }
}
