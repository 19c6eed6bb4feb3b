//! Resolved route tree model.
//!
//! A [`RouteDescriptor`] is the unit of output: one route entry with its
//! fields in declaration order. After resolution no field holds an
//! identifier, spread marker or lazy-reference string any more: every value
//! is literal text or an already-recursed route sequence.

use indexmap::IndexMap;
use serde::Serialize;

/// One resolved route entry: an insertion-ordered field map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteDescriptor {
    fields: IndexMap<String, RouteValue>,
}

impl RouteDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: RouteValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&RouteValue> {
        self.fields.get(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &RouteValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RouteValue)> for RouteDescriptor {
    fn from_iter<I: IntoIterator<Item = (K, RouteValue)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteValue {
    /// Literal text: string literals with quotes stripped, anything else as
    /// verbatim source text.
    Text(String),
    /// An already-recursed route sequence (`children`, or an expanded
    /// `loadChildren` sub-tree).
    Routes(Vec<RouteDescriptor>),
}

impl RouteValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Routes(_) => None,
        }
    }

    pub fn as_routes(&self) -> Option<&[RouteDescriptor]> {
        match self {
            Self::Text(_) => None,
            Self::Routes(routes) => Some(routes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RouteDescriptor> {
        vec![
            RouteDescriptor::from_iter([
                ("path", RouteValue::text("")),
                ("pathMatch", RouteValue::text("full")),
            ]),
            RouteDescriptor::from_iter([
                ("path", RouteValue::text("lazy")),
                (
                    "loadChildren",
                    RouteValue::Routes(vec![RouteDescriptor::from_iter([(
                        "path",
                        RouteValue::text(""),
                    )])]),
                ),
            ]),
        ]
    }

    #[test]
    fn json_output_preserves_field_order() {
        let json = serde_json::to_string(&sample()).expect("serialization failed");
        assert_eq!(
            json,
            r#"[{"path":"","pathMatch":"full"},{"path":"lazy","loadChildren":[{"path":""}]}]"#
        );
    }

    #[test]
    fn pretty_json_uses_two_space_indentation() {
        let routes = vec![RouteDescriptor::from_iter([("path", RouteValue::text("a"))])];
        let json = serde_json::to_string_pretty(&routes).expect("serialization failed");
        assert_eq!(json, "[\n  {\n    \"path\": \"a\"\n  }\n]");
    }

    #[test]
    fn insert_replaces_but_keeps_position() {
        let mut route = RouteDescriptor::new();
        route.insert("path", RouteValue::text("a"));
        route.insert("component", RouteValue::text("undefined"));
        route.insert("path", RouteValue::text("b"));
        let names: Vec<_> = route.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["path", "component"]);
        assert_eq!(route.get("path").and_then(RouteValue::as_text), Some("b"));
    }
}
