//! Static route extraction for Angular-style NgModule trees.
//!
//! Rutter resolves the effective route configuration of a module file
//! without executing any code: it parses the file with OXC, locates the
//! single exported `@NgModule` class, and expands every indirection in its
//! `RouterModule.forRoot` / `RouterModule.forChild` registration (variable
//! references, re-exports, array-spread merges and cross-file
//! `loadChildren` lazy references) into a concrete, ordered route tree.
//!
//! The result is pure data ([`RouteDescriptor`]) suitable for pre-rendering,
//! sitemap generation or static validation ahead of runtime.
//!
//! # Supported subset
//!
//! The engine assembles structure, it does not evaluate programs: only
//! literal arrays/objects/strings and named-import chains resolve. Default
//! and namespace imports, computed metadata keys and arbitrary expressions
//! are outside the subset and fail fast with a [`ResolveError`]. Route
//! semantics (duplicate paths, guard correctness) are not validated.
//!
//! # Example
//!
//! ```rust,no_run
//! use rutter_resolver::resolve_routes;
//!
//! let routes = resolve_routes("src/app/app.module.ts", None)?;
//! println!("{}", serde_json::to_string_pretty(&routes).unwrap());
//! # Ok::<(), rutter_resolver::ResolveError>(())
//! ```

pub mod error;
pub mod host;
mod imports;
mod locate;
mod metadata;
pub mod model;
pub mod query;
mod resolver;
mod routes;

pub use error::{ResolveError, Result};
pub use model::{RouteDescriptor, RouteValue};
pub use resolver::resolve_routes;
