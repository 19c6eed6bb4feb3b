//! Pure syntactic classifiers over OXC nodes.
//!
//! Predicates here never resolve symbols and never fail; they look at one
//! node and answer a yes/no question about its shape. The recognized
//! decorator and factory names are fixed allow-lists.

use oxc_ast::ast::{
    ArrayExpression, CallExpression, Class, Decorator, Expression, ObjectExpression,
};
use oxc_span::GetSpan;

/// Decorator name that marks a module class.
pub const MODULE_DECORATOR: &str = "NgModule";

/// Receiver of the recognized route registration factories.
pub const ROUTER_RECEIVER: &str = "RouterModule";

/// Recognized registration factory methods: root and child registration.
pub const ROUTER_FACTORIES: [&str; 2] = ["forRoot", "forChild"];

/// Whether a decorator is the recognized module annotation, i.e. a call of
/// the bare identifier `NgModule`.
pub fn is_module_decorator(decorator: &Decorator) -> bool {
    let Expression::CallExpression(call) = &decorator.expression else {
        return false;
    };
    matches!(&call.callee, Expression::Identifier(ident) if ident.name == MODULE_DECORATOR)
}

/// Whether a class carries the module annotation.
pub fn is_module_class(class: &Class) -> bool {
    class.decorators.iter().any(is_module_decorator)
}

/// The module annotation carried by a class, if any.
pub fn module_decorator<'a>(class: &'a Class<'a>) -> Option<&'a Decorator<'a>> {
    class
        .decorators
        .iter()
        .find(|decorator| is_module_decorator(decorator))
}

/// Whether a call expression is one of the recognized route registration
/// factories (`RouterModule.forRoot` / `RouterModule.forChild`).
pub fn is_router_factory_call(call: &CallExpression) -> bool {
    let Expression::StaticMemberExpression(member) = &call.callee else {
        return false;
    };
    let Expression::Identifier(receiver) = &member.object else {
        return false;
    };
    receiver.name == ROUTER_RECEIVER && ROUTER_FACTORIES.contains(&member.property.name.as_str())
}

/// View an expression as an array literal.
pub fn as_array<'a>(expr: &'a Expression<'a>) -> Option<&'a ArrayExpression<'a>> {
    match expr {
        Expression::ArrayExpression(array) => Some(array),
        _ => None,
    }
}

/// View an expression as an object literal.
pub fn as_object<'a>(expr: &'a Expression<'a>) -> Option<&'a ObjectExpression<'a>> {
    match expr {
        Expression::ObjectExpression(object) => Some(object),
        _ => None,
    }
}

/// Best-effort literal text of an expression.
///
/// String literals lose their surrounding quotes; every other expression
/// kind is rendered as its verbatim source text. This is a rendering
/// fallback, not evaluation.
pub fn literal_text(expr: &Expression<'_>, source: &str) -> String {
    match expr {
        Expression::StringLiteral(literal) => literal.value.to_string(),
        _ => expr.span().source_text(source).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SourceUnit;
    use oxc_ast::ast::Statement;

    fn with_expression(source: &str, f: impl Fn(&Expression<'_>, &str)) {
        let text = format!("const probe = {source};");
        let unit = SourceUnit::from_source("probe.ts", text.clone());
        unit.analyze(|view| {
            let Statement::VariableDeclaration(declaration) = &view.program.body[0] else {
                panic!("expected a variable declaration");
            };
            let init = declaration.declarations[0]
                .init
                .as_ref()
                .expect("probe should have an initializer");
            f(init, view.source);
            Ok(())
        })
        .expect("probe analysis failed");
    }

    #[test]
    fn recognizes_both_router_factories() {
        for factory in ROUTER_FACTORIES {
            with_expression(&format!("RouterModule.{factory}([])"), |expr, _| {
                let Expression::CallExpression(call) = expr else {
                    panic!("expected a call expression");
                };
                assert!(is_router_factory_call(call), "{factory} should match");
            });
        }
    }

    #[test]
    fn rejects_other_receivers_and_methods() {
        for snippet in [
            "OtherModule.forRoot([])",
            "RouterModule.forever([])",
            "forRoot([])",
        ] {
            with_expression(snippet, |expr, _| {
                let Expression::CallExpression(call) = expr else {
                    panic!("expected a call expression");
                };
                assert!(!is_router_factory_call(call), "{snippet} should not match");
            });
        }
    }

    #[test]
    fn literal_text_strips_quotes_only_from_strings() {
        with_expression("'lazy'", |expr, source| {
            assert_eq!(literal_text(expr, source), "lazy");
        });
        with_expression("undefined", |expr, source| {
            assert_eq!(literal_text(expr, source), "undefined");
        });
        with_expression("42", |expr, source| {
            assert_eq!(literal_text(expr, source), "42");
        });
    }

    #[test]
    fn module_decorator_requires_bare_identifier_callee() {
        let unit = SourceUnit::from_source(
            "module.ts",
            "@NgModule({ imports: [] })\nexport class A {}\n@core.NgModule({})\nexport class B {}\n",
        );
        unit.analyze(|view| {
            let classes: Vec<_> = view
                .program
                .body
                .iter()
                .filter_map(|statement| match statement {
                    Statement::ExportNamedDeclaration(export) => match &export.declaration {
                        Some(oxc_ast::ast::Declaration::ClassDeclaration(class)) => {
                            Some(&**class)
                        }
                        _ => None,
                    },
                    _ => None,
                })
                .collect();
            assert_eq!(classes.len(), 2);
            assert!(is_module_class(classes[0]));
            assert!(!is_module_class(classes[1]));
            Ok(())
        })
        .expect("analysis failed");
    }
}
