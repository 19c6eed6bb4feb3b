//! Top-level resolution driver.
//!
//! One call = one file: parse, locate the module, extract its metadata,
//! aggregate its imports into registrations, and build the route tree from
//! the single recognized registration. Lazy references and imported modules
//! re-enter the driver on other files; the [`Trail`] threaded through every
//! recursion is what turns a reference cycle into an error instead of
//! unbounded recursion.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::{debug, info};

use crate::error::{ResolveError, Result};
use crate::host::SourceUnit;
use crate::imports::{self, Registration};
use crate::locate;
use crate::metadata;
use crate::model::RouteDescriptor;
use crate::routes;

/// Immutable trail of in-progress `(file, name)` resolutions.
///
/// Passed by value into every cross-file recursion; re-entering a frame that
/// is already on the trail is a cycle. Nothing survives a top-level call.
#[derive(Clone, Debug, Default)]
pub(crate) struct Trail {
    frames: Vec<(PathBuf, String)>,
}

impl Trail {
    /// Push a frame, failing if it is already on the trail.
    pub(crate) fn enter(&self, path: &Path, name: &str) -> Result<Trail> {
        let path = path.to_path_buf().clean();
        if self
            .frames
            .iter()
            .any(|(frame_path, frame_name)| frame_path == &path && frame_name == name)
        {
            return Err(ResolveError::Cycle(format!("{}#{name}", path.display())));
        }
        let mut entered = self.clone();
        entered.frames.push((path, name.to_string()));
        Ok(entered)
    }
}

/// Resolve the route tree registered by the module declared in `path`.
///
/// When `expected_name` is given, the file's module declaration must carry
/// exactly that name. The returned sequence is fully resolved: spreads are
/// merged, `children` recursed, and every `loadChildren` reference replaced
/// by the route tree of the referenced module.
///
/// # Example
///
/// ```rust,no_run
/// use rutter_resolver::resolve_routes;
///
/// let routes = resolve_routes("src/app/app.module.ts", None)?;
/// for route in &routes {
///     println!("{:?}", route.get("path"));
/// }
/// # Ok::<(), rutter_resolver::ResolveError>(())
/// ```
pub fn resolve_routes(
    path: impl AsRef<Path>,
    expected_name: Option<&str>,
) -> Result<Vec<RouteDescriptor>> {
    resolve_at(path.as_ref(), expected_name, &Trail::default())
}

/// Run the pipeline for one file, re-entrant for lazy references and
/// imported modules.
pub(crate) fn resolve_at(
    path: &Path,
    expected_name: Option<&str>,
    trail: &Trail,
) -> Result<Vec<RouteDescriptor>> {
    let trail = trail.enter(path, expected_name.unwrap_or_default())?;
    debug!(file = %path.display(), module = expected_name, "resolving module file");

    let unit = SourceUnit::load(path)?;
    unit.analyze(|view| {
        let module = locate::locate_module(view, expected_name)?;
        let fields = metadata::extract_metadata(module.class)?;
        let registrations = imports::collect_registrations(view, &fields, &trail)?;

        if registrations.len() > 1 {
            return Err(ResolveError::MultipleRegistrations {
                module: module.name.to_string(),
            });
        }
        match registrations.into_iter().next() {
            None => {
                info!(module = module.name, "module registers no routes");
                Ok(Vec::new())
            }
            Some(Registration::Call(call)) => routes::routes_from_call(view, call, &trail),
            Some(Registration::Resolved(built)) => Ok(built),
        }
    })
}
