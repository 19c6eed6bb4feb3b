//! Route tree builder: turn a registration call's configuration array into
//! resolved route descriptors.
//!
//! The walk preserves element order throughout; a route configuration is a
//! priority-ordered matching list. Spreads are flattened a single level,
//! `children` arrays recurse in place, and `loadChildren` references re-run
//! the entire resolution pipeline against the referenced file.

use std::path::{Path, PathBuf};

use oxc_ast::ast::{
    ArrayExpression, ArrayExpressionElement, CallExpression, ObjectExpression, ObjectPropertyKind,
};
use oxc_span::Span;
use path_clean::PathClean;

use crate::error::{ResolveError, Result};
use crate::host::FileView;
use crate::metadata::property_key_name;
use crate::model::{RouteDescriptor, RouteValue};
use crate::query;
use crate::resolver::{self, Trail};

/// Source file extension appended to extension-less lazy references.
const SOURCE_EXTENSION: &str = ".ts";

/// Build routes from a recognized registration call.
///
/// The call must carry exactly one argument; if that argument is an
/// identifier it is resolved one hop to its initializer, which must be an
/// array literal.
pub(crate) fn routes_from_call<'a>(
    view: &FileView<'a>,
    call: &'a CallExpression<'a>,
    trail: &Trail,
) -> Result<Vec<RouteDescriptor>> {
    if call.arguments.len() != 1 {
        return Err(ResolveError::RegistrationArity {
            found: call.arguments.len(),
        });
    }
    let Some(argument) = call.arguments[0].as_expression() else {
        return Err(ResolveError::ConfigNotArray);
    };
    let config = view.hop_initializer(argument)?;
    let Some(array) = query::as_array(config) else {
        return Err(ResolveError::ConfigNotArray);
    };
    routes_from_array(view, array, trail, &[])
}

/// Recursive core: expand one configuration array into route descriptors.
///
/// `expanding` carries the spans of array literals currently being expanded
/// in this file; re-entering one of them (a self-referential `children`
/// constant) is a cycle.
pub(crate) fn routes_from_array<'a>(
    view: &FileView<'a>,
    array: &'a ArrayExpression<'a>,
    trail: &Trail,
    expanding: &[Span],
) -> Result<Vec<RouteDescriptor>> {
    if expanding.contains(&array.span) {
        return Err(ResolveError::Cycle(format!(
            "children array in '{}'",
            view.path.display()
        )));
    }
    let mut expanding = expanding.to_vec();
    expanding.push(array.span);

    // Flatten: splice spread targets a single level, keep everything else
    // in place.
    let mut entries = Vec::new();
    for element in array.elements.iter() {
        match element {
            ArrayExpressionElement::SpreadElement(spread) => {
                let target = view.hop_initializer(&spread.argument)?;
                if let Some(inner) = query::as_array(target) {
                    for spliced in inner.elements.iter() {
                        // Nested spreads inside the target are not expanded
                        // further; they fall through the object filter below.
                        if let Some(expr) = spliced.as_expression() {
                            entries.push(expr);
                        }
                    }
                }
            }
            ArrayExpressionElement::Elision(_) => {}
            _ => {
                if let Some(expr) = element.as_expression() {
                    entries.push(expr);
                }
            }
        }
    }

    let objects: Vec<&'a ObjectExpression<'a>> = entries
        .iter()
        .filter_map(|entry| query::as_object(entry))
        .collect();
    if objects.is_empty() {
        return Err(ResolveError::NoRoutes);
    }

    let mut routes = Vec::with_capacity(objects.len());
    for object in objects {
        routes.push(route_from_object(view, object, trail, &expanding)?);
    }
    Ok(routes)
}

fn route_from_object<'a>(
    view: &FileView<'a>,
    object: &'a ObjectExpression<'a>,
    trail: &Trail,
    expanding: &[Span],
) -> Result<RouteDescriptor> {
    let mut route = RouteDescriptor::new();

    for member in object.properties.iter() {
        let ObjectPropertyKind::ObjectProperty(property) = member else {
            continue;
        };
        if property.computed || property.method {
            continue;
        }
        let Some(name) = property_key_name(&property.key) else {
            continue;
        };

        let value = match name {
            "children" => {
                let resolved = view.hop_initializer(&property.value)?;
                let Some(array) = query::as_array(resolved) else {
                    return Err(ResolveError::UnsupportedSyntax(
                        "route children must be an array literal".to_string(),
                    ));
                };
                RouteValue::Routes(routes_from_array(view, array, trail, expanding)?)
            }
            "loadChildren" => {
                let text = query::literal_text(&property.value, view.source);
                let reference = LazyReference::parse(&text)?;
                let target = reference.resolve_against(view.path);
                RouteValue::Routes(resolver::resolve_at(
                    &target,
                    Some(&reference.module_name),
                    trail,
                )?)
            }
            _ => RouteValue::Text(query::literal_text(&property.value, view.source)),
        };
        route.insert(name, value);
    }
    Ok(route)
}

/// A parsed `"<relativePath>#<ModuleName>"` lazy reference.
pub(crate) struct LazyReference {
    pub path: String,
    pub module_name: String,
}

impl LazyReference {
    /// Split on the first `#`; both halves must be non-empty. The source
    /// extension is appended when the path lacks it.
    pub fn parse(text: &str) -> Result<Self> {
        let Some((path, module_name)) = text.split_once('#') else {
            return Err(ResolveError::InvalidLazyReference(text.to_string()));
        };
        if path.is_empty() || module_name.is_empty() {
            return Err(ResolveError::InvalidLazyReference(text.to_string()));
        }
        let mut path = path.to_string();
        if !path.ends_with(SOURCE_EXTENSION) {
            path.push_str(SOURCE_EXTENSION);
        }
        Ok(Self {
            path,
            module_name: module_name.to_string(),
        })
    }

    /// Resolve the referenced file relative to the directory of the file
    /// holding the reference.
    pub fn resolve_against(&self, current: &Path) -> PathBuf {
        let dir = current.parent().unwrap_or_else(|| Path::new("."));
        dir.join(&self.path).clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_reference_splits_on_first_hash() {
        let reference = LazyReference::parse("./lazy.module#LazyModule").expect("should parse");
        assert_eq!(reference.path, "./lazy.module.ts");
        assert_eq!(reference.module_name, "LazyModule");

        let odd = LazyReference::parse("./a#B#C").expect("should parse");
        assert_eq!(odd.path, "./a.ts");
        assert_eq!(odd.module_name, "B#C");
    }

    #[test]
    fn lazy_reference_keeps_existing_extension() {
        let reference = LazyReference::parse("./lazy.module.ts#LazyModule").expect("should parse");
        assert_eq!(reference.path, "./lazy.module.ts");
    }

    #[test]
    fn malformed_lazy_references_are_rejected() {
        for text in ["no-hash", "#Name", "./path#", "#"] {
            assert!(
                matches!(
                    LazyReference::parse(text),
                    Err(ResolveError::InvalidLazyReference(_))
                ),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn lazy_reference_resolves_against_holding_file() {
        let reference = LazyReference::parse("./sub/lazy#Lazy").expect("should parse");
        let target = reference.resolve_against(Path::new("/app/src/test.module.ts"));
        assert_eq!(target, Path::new("/app/src/sub/lazy.ts"));
    }
}
