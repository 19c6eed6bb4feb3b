//! Rutter CLI - static route extraction for Angular-style module trees.
//!
//! Entry point: argument parsing, logger setup and error reporting. The
//! actual resolution lives in the `rutter-resolver` crate.

use std::time::Instant;

use clap::Parser;
use miette::Result;
use rutter_cli::{cli, error, logger, output};
use tracing::info;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    run(args).map_err(error::cli_error_to_report)
}

fn run(args: cli::Cli) -> error::Result<()> {
    let cwd = std::env::current_dir()?;
    let module_file = cwd.join(&args.module);

    info!("resolving routes from module '{}'", module_file.display());
    let started = Instant::now();
    let routes = rutter_resolver::resolve_routes(&module_file, None)?;
    info!(
        routes = routes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "resolution finished"
    );

    match args.out {
        Some(out) => {
            let out_file = cwd.join(out);
            info!("writing routes to '{}'", out_file.display());
            output::write_json(&routes, &out_file)?;
        }
        None => println!("{}", output::render(&routes)),
    }

    Ok(())
}
