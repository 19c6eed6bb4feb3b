//! Module locator: find the single exported, annotated module class in a
//! file.

use oxc_ast::ast::{Class, Declaration, Statement};
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::host::{FileView, class_name};
use crate::query;

/// A located module declaration plus its display name.
pub struct LocatedModule<'a> {
    pub class: &'a Class<'a>,
    pub name: &'a str,
}

/// Locate the annotated module class of a file.
///
/// Exactly one exported class carrying the module annotation must exist;
/// zero or several is a structural error. When `expected_name` is given the
/// located class must match it exactly (case-sensitive).
pub fn locate_module<'a>(
    view: &FileView<'a>,
    expected_name: Option<&str>,
) -> Result<LocatedModule<'a>> {
    let mut modules: Vec<&'a Class<'a>> = Vec::new();

    for statement in view.program.body.iter() {
        let class: Option<&'a Class<'a>> = match statement {
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::ClassDeclaration(class)) => Some(&**class),
                _ => None,
            },
            // Plain declaration exported further down via `export { Name }`.
            Statement::ClassDeclaration(class) => class_name(class)
                .filter(|name| view.is_exported_by_specifier(name))
                .map(|_| &**class),
            _ => None,
        };

        if let Some(class) = class {
            if query::is_module_class(class) {
                modules.push(class);
            }
        }
    }

    let module = match modules.len() {
        0 => {
            return Err(ResolveError::NoModule {
                path: view.path.to_path_buf(),
            });
        }
        1 => modules[0],
        count => {
            return Err(ResolveError::AmbiguousModule {
                path: view.path.to_path_buf(),
                count,
            });
        }
    };

    let name = class_name(module).unwrap_or("<anonymous>");
    if let Some(expected) = expected_name {
        if name != expected {
            return Err(ResolveError::ModuleNameMismatch {
                expected: expected.to_string(),
                found: name.to_string(),
                path: view.path.to_path_buf(),
            });
        }
    }

    debug!(module = name, file = %view.path.display(), "located module declaration");
    Ok(LocatedModule {
        class: module,
        name,
    })
}
