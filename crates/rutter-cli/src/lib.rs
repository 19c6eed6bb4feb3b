//! Command-line front end for the route resolver.
//!
//! The binary is a thin wrapper: parse arguments, initialize logging, call
//! [`rutter_resolver::resolve_routes`] and render the result either as an
//! annotated dump on stdout or as pretty JSON to a file.

pub mod cli;
pub mod error;
pub mod logger;
pub mod output;
