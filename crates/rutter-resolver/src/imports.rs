//! Import aggregator: flatten a module's `imports` field into an ordered
//! list of route registrations.
//!
//! Identifiers are chased through the symbol table: same-file constants and
//! module classes resolve in place, named imports re-enter the program host
//! on the referenced file. Elements that cannot be a registration factory
//! call after resolution are dropped; resolution failures at any hop abort
//! the whole operation.

use std::path::{Path, PathBuf};

use oxc_ast::ast::{ArrayExpression, ArrayExpressionElement, CallExpression, Expression};
use path_clean::PathClean;
use tracing::{debug, info};

use crate::error::{ResolveError, Result};
use crate::host::{Binding, Export, FileView, SourceUnit, class_name};
use crate::metadata::{self, MetadataMap};
use crate::model::RouteDescriptor;
use crate::query;
use crate::resolver::{self, Trail};
use crate::routes;

/// One route registration found while flattening a module's imports.
pub(crate) enum Registration<'a> {
    /// A recognized factory call in the file under analysis, not yet built.
    Call(&'a CallExpression<'a>),
    /// A registration chased into another file and resolved there.
    Resolved(Vec<RouteDescriptor>),
}

/// Resolve a module's `imports` field into route registrations.
///
/// A missing or non-array `imports` value yields an empty list; a module
/// without routing setup is valid.
pub(crate) fn collect_registrations<'a>(
    view: &FileView<'a>,
    metadata: &MetadataMap<'a>,
    trail: &Trail,
) -> Result<Vec<Registration<'a>>> {
    let Some(imports) = metadata.get("imports") else {
        info!(file = %view.path.display(), "no imports found in module");
        return Ok(Vec::new());
    };
    let imports = view.hop_initializer(imports)?;
    let Some(array) = query::as_array(imports) else {
        info!(
            file = %view.path.display(),
            "module imports are not an array literal; only array literals are supported"
        );
        return Ok(Vec::new());
    };
    registrations_from_array(view, array, trail)
}

fn registrations_from_array<'a>(
    view: &FileView<'a>,
    array: &'a ArrayExpression<'a>,
    trail: &Trail,
) -> Result<Vec<Registration<'a>>> {
    let mut registrations = Vec::new();

    for element in array.elements.iter() {
        match element {
            ArrayExpressionElement::SpreadElement(spread) => {
                splice_spread(view, &spread.argument, trail, &mut registrations)?;
            }
            ArrayExpressionElement::Elision(_) => {}
            _ => {
                if let Some(expr) = element.as_expression() {
                    register_element(view, expr, trail, &mut registrations)?;
                }
            }
        }
    }
    Ok(registrations)
}

/// Splice a spread target's elements in place, one identifier hop deep.
fn splice_spread<'a>(
    view: &FileView<'a>,
    argument: &'a Expression<'a>,
    trail: &Trail,
    out: &mut Vec<Registration<'a>>,
) -> Result<()> {
    if let Expression::Identifier(ident) = argument {
        if let Binding::Import { imported, source } = view.declaration_of(ident)? {
            for built in chase_imported_array(view, &imported, source, trail)? {
                out.push(Registration::Resolved(built));
            }
            return Ok(());
        }
    }

    let target = view.hop_initializer(argument)?;
    let Some(array) = query::as_array(target) else {
        // Anything but a literal array contributes nothing.
        return Ok(());
    };
    for element in array.elements.iter() {
        // Single-level flattening: nested spreads in the target stay closed.
        if let Some(expr) = element.as_expression() {
            register_element(view, expr, trail, out)?;
        }
    }
    Ok(())
}

/// Classify one flattened imports element, pushing at most one registration
/// (or, for imported modules, the registrations they resolve to).
fn register_element<'a>(
    view: &FileView<'a>,
    expr: &'a Expression<'a>,
    trail: &Trail,
    out: &mut Vec<Registration<'a>>,
) -> Result<()> {
    match expr {
        Expression::CallExpression(call) => {
            if query::is_router_factory_call(call) {
                out.push(Registration::Call(call));
            } else {
                debug!(file = %view.path.display(), "skipping unrecognized call in imports");
            }
        }
        Expression::Identifier(ident) => match view.declaration_of(ident)? {
            Binding::Variable(declarator) => {
                let init = declarator
                    .init
                    .as_ref()
                    .ok_or_else(|| ResolveError::MissingInitializer(ident.name.to_string()))?;
                if let Expression::CallExpression(call) = init {
                    if query::is_router_factory_call(call) {
                        out.push(Registration::Call(call));
                    }
                }
            }
            Binding::Class(class) => {
                if query::is_module_class(class) {
                    // A module importing another module declared in the same
                    // file: splice that module's own registrations. The
                    // spliced class gets its own trail frame; self-imports
                    // and mutual imports would otherwise recurse unbounded.
                    let splice_trail =
                        trail.enter(view.path, class_name(class).unwrap_or_default())?;
                    let inner = metadata::extract_metadata(class)?;
                    out.extend(collect_registrations(view, &inner, &splice_trail)?);
                }
            }
            Binding::Import { imported, source } => {
                if let Some(built) = chase_module_import(view, &imported, source, trail)? {
                    out.push(Registration::Resolved(built));
                }
            }
        },
        _ => {}
    }
    Ok(())
}

/// Follow a named import to another file and resolve the registration it
/// points at, if any.
///
/// The export may be a module class (run the full pipeline on that file) or
/// a constant holding a factory call (build its routes in that file's
/// context). Anything else is dropped.
fn chase_module_import(
    view: &FileView<'_>,
    name: &str,
    source: &str,
    trail: &Trail,
) -> Result<Option<Vec<RouteDescriptor>>> {
    let Some(target) = resolve_import_path(view.path, source) else {
        debug!(name, source, "skipping import from external package");
        return Ok(None);
    };
    let chase_trail = trail.enter(&target, name)?;

    enum Chased {
        ModuleClass,
        Built(Vec<RouteDescriptor>),
        Skip,
    }

    let unit = SourceUnit::load(&target)?;
    let chased = unit.analyze(|foreign| match foreign.exported_declaration(name) {
        None => Err(ResolveError::MissingExport {
            name: name.to_string(),
            path: target.clone(),
        }),
        Some(Export::Class(class)) => {
            if query::is_module_class(class) {
                Ok(Chased::ModuleClass)
            } else {
                Ok(Chased::Skip)
            }
        }
        Some(Export::Variable(declarator)) => match declarator.init.as_ref() {
            None => Err(ResolveError::MissingInitializer(name.to_string())),
            Some(Expression::CallExpression(call)) if query::is_router_factory_call(call) => {
                routes::routes_from_call(foreign, call, &chase_trail).map(Chased::Built)
            }
            Some(_) => Ok(Chased::Skip),
        },
    })?;

    match chased {
        // The class peek above is discarded with its arena; the module's own
        // pipeline re-parses the file.
        Chased::ModuleClass => {
            let built = resolver::resolve_at(&target, Some(name), trail)?;
            // A module with no routing setup contributes nothing.
            Ok((!built.is_empty()).then_some(built))
        }
        Chased::Built(built) => Ok(Some(built)),
        Chased::Skip => Ok(None),
    }
}

/// Follow a spread over a named import: the export must be a constant array,
/// whose elements are aggregated in the exporting file's context.
fn chase_imported_array(
    view: &FileView<'_>,
    name: &str,
    source: &str,
    trail: &Trail,
) -> Result<Vec<Vec<RouteDescriptor>>> {
    let Some(target) = resolve_import_path(view.path, source) else {
        debug!(name, source, "skipping spread over external package import");
        return Ok(Vec::new());
    };
    let chase_trail = trail.enter(&target, name)?;

    let unit = SourceUnit::load(&target)?;
    unit.analyze(|foreign| match foreign.exported_declaration(name) {
        None => Err(ResolveError::MissingExport {
            name: name.to_string(),
            path: target.clone(),
        }),
        Some(Export::Variable(declarator)) => {
            let init = declarator
                .init
                .as_ref()
                .ok_or_else(|| ResolveError::MissingInitializer(name.to_string()))?;
            let Some(array) = query::as_array(init) else {
                return Ok(Vec::new());
            };
            // Registrations local to the exporting file must be built before
            // its arena is dropped.
            let mut built = Vec::new();
            for registration in registrations_from_array(foreign, array, &chase_trail)? {
                match registration {
                    Registration::Call(call) => {
                        built.push(routes::routes_from_call(foreign, call, &chase_trail)?);
                    }
                    Registration::Resolved(resolved) => built.push(resolved),
                }
            }
            Ok(built)
        }
        Some(Export::Class(_)) => Ok(Vec::new()),
    })
}

/// Resolve a relative import specifier against the importing file's
/// directory. Bare package specifiers have no statically reachable file.
fn resolve_import_path(importer: &Path, specifier: &str) -> Option<PathBuf> {
    if !specifier.starts_with('.') {
        return None;
    }
    let mut file = specifier.to_string();
    if !file.ends_with(".ts") {
        file.push_str(".ts");
    }
    let dir = importer.parent().unwrap_or_else(|| Path::new("."));
    Some(dir.join(file).clean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::locate_module;

    fn registrations_in(source: &str) -> Result<usize> {
        let unit = SourceUnit::from_source("test.module.ts", source);
        unit.analyze(|view| {
            let located = locate_module(view, None)?;
            let fields = metadata::extract_metadata(located.class)?;
            let registrations = collect_registrations(view, &fields, &Trail::default())?;
            Ok(registrations.len())
        })
    }

    #[test]
    fn missing_imports_field_yields_no_registrations() {
        let count = registrations_in("@NgModule({ providers: [] })\nexport class M {}")
            .expect("aggregation failed");
        assert_eq!(count, 0);
    }

    #[test]
    fn non_array_imports_yield_no_registrations() {
        let count = registrations_in("@NgModule({ imports: MISSING })\nexport class M {}");
        // An unresolvable identifier fails fast rather than degrading.
        assert!(matches!(count, Err(ResolveError::UnresolvedIdentifier(_))));

        let count = registrations_in("@NgModule({ imports: 42 })\nexport class M {}")
            .expect("aggregation failed");
        assert_eq!(count, 0);
    }

    #[test]
    fn counts_recognized_factory_calls_only() {
        let source = "\
@NgModule({ imports: [CommonThing.setup(), RouterModule.forRoot([{ path: '' }])] })
export class M {}
";
        // `CommonThing.setup()` is a call but not a recognized factory.
        let count = registrations_in(source).expect("aggregation failed");
        assert_eq!(count, 1);
    }

    #[test]
    fn resolves_imports_array_behind_a_constant() {
        let source = "\
const IMPORTS = [RouterModule.forChild([{ path: '' }])];
@NgModule({ imports: IMPORTS })
export class M {}
";
        let count = registrations_in(source).expect("aggregation failed");
        assert_eq!(count, 1);
    }

    #[test]
    fn splices_spread_of_local_constant() {
        let source = "\
const SHARED = [RouterModule.forChild([{ path: '' }]), RouterModule.forChild([{ path: 'x' }])];
@NgModule({ imports: [...SHARED] })
export class M {}
";
        let count = registrations_in(source).expect("aggregation failed");
        assert_eq!(count, 2);
    }

    #[test]
    fn registration_behind_constant_call_is_found() {
        let source = "\
const ROUTING = RouterModule.forRoot([{ path: '' }]);
@NgModule({ imports: [ROUTING] })
export class M {}
";
        let count = registrations_in(source).expect("aggregation failed");
        assert_eq!(count, 1);
    }

    #[test]
    fn same_file_module_imports_are_spliced() {
        let source = "\
@NgModule({ imports: [RouterModule.forChild([{ path: '' }])] })
class Feature {}
@NgModule({ imports: [Feature] })
export class Root {}
";
        let count = registrations_in(source).expect("aggregation failed");
        assert_eq!(count, 1);
    }

    #[test]
    fn self_importing_module_is_a_cycle() {
        let result = registrations_in("@NgModule({ imports: [M] })\nexport class M {}");
        assert!(matches!(result, Err(ResolveError::Cycle(_))));
    }

    #[test]
    fn relative_import_paths_resolve_against_importer() {
        let target = resolve_import_path(Path::new("/app/src/app.module.ts"), "./routing.module");
        assert_eq!(target, Some(PathBuf::from("/app/src/routing.module.ts")));

        let external = resolve_import_path(Path::new("/app/src/app.module.ts"), "@angular/router");
        assert_eq!(external, None);
    }
}
