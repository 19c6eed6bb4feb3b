//! Metadata extractor: turn a module annotation argument into an ordered
//! field map.

use indexmap::IndexMap;
use oxc_ast::ast::{Class, Expression, ObjectPropertyKind, PropertyKey};

use crate::error::{ResolveError, Result};
use crate::query;

/// Field name → initializer expression, in declaration order.
///
/// Only simple key→expression assignments survive extraction; computed keys,
/// spread members and method-valued members inside the metadata object are
/// silently dropped.
pub struct MetadataMap<'a> {
    fields: IndexMap<&'a str, &'a Expression<'a>>,
}

impl<'a> MetadataMap<'a> {
    pub fn get(&self, name: &str) -> Option<&'a Expression<'a>> {
        self.fields.get(name).copied()
    }
}

/// Extract the metadata map from a module class's annotation.
///
/// The annotation must carry a single object-literal argument with at least
/// one simple property assignment.
pub fn extract_metadata<'a>(class: &'a Class<'a>) -> Result<MetadataMap<'a>> {
    let decorator = query::module_decorator(class).ok_or_else(|| {
        ResolveError::UnsupportedSyntax("class carries no module annotation".to_string())
    })?;
    let Expression::CallExpression(call) = &decorator.expression else {
        return Err(ResolveError::UnsupportedSyntax(
            "module annotation is not a call".to_string(),
        ));
    };

    let Some(argument) = call.arguments.first().and_then(|arg| arg.as_expression()) else {
        return Err(ResolveError::UnsupportedSyntax(
            "no arguments passed to the module annotation".to_string(),
        ));
    };
    let Some(object) = query::as_object(argument) else {
        return Err(ResolveError::UnsupportedSyntax(
            "only object literals are supported as the module annotation argument".to_string(),
        ));
    };

    let mut fields = IndexMap::new();
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
        fields.insert(name, &property.value);
    }

    if fields.is_empty() {
        return Err(ResolveError::UnsupportedSyntax(
            "no properties found in the module annotation object; only property assignments are supported"
                .to_string(),
        ));
    }
    Ok(MetadataMap { fields })
}

/// Static name of an object property key: identifier or string-literal keys
/// only.
pub fn property_key_name<'a>(key: &'a PropertyKey<'a>) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.as_str()),
        _ => None,
    }
}
