//! Route tree rendering.
//!
//! Two output shapes: an indented block dump for the terminal and pretty
//! JSON for `--out`. Resolved field values are always text, so the dump
//! quotes every scalar.

use std::fs;
use std::path::Path;

use rutter_resolver::{RouteDescriptor, RouteValue};

use crate::error::Result;

/// Render the route tree in block notation with two-space indentation.
pub fn render(routes: &[RouteDescriptor]) -> String {
    render_routes(routes, 0)
}

/// Write the route tree as pretty JSON, creating parent directories.
pub fn write_json(routes: &[RouteDescriptor], file: &Path) -> Result<()> {
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(routes)?;
    fs::write(file, json + "\n")?;
    Ok(())
}

fn render_routes(routes: &[RouteDescriptor], depth: usize) -> String {
    if routes.is_empty() {
        return "[]".to_string();
    }
    let prefix = "  ".repeat(depth);
    let inner = format!("{prefix}  ");
    let body = routes
        .iter()
        .map(|route| render_route(route, depth + 1))
        .collect::<Vec<_>>()
        .join(&format!(",\n{inner}"));
    format!("[\n{inner}{body}\n{prefix}]")
}

fn render_route(route: &RouteDescriptor, depth: usize) -> String {
    if route.is_empty() {
        return "{}".to_string();
    }
    let prefix = "  ".repeat(depth);
    let inner = format!("{prefix}  ");
    let body = route
        .fields()
        .map(|(name, value)| format!("{name}: {}", render_value(value, depth + 1)))
        .collect::<Vec<_>>()
        .join(&format!(",\n{inner}"));
    format!("{{\n{inner}{body}\n{prefix}}}")
}

fn render_value(value: &RouteValue, depth: usize) -> String {
    match value {
        RouteValue::Text(text) => format!("\"{text}\""),
        RouteValue::Routes(routes) => render_routes(routes, depth),
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
    fn renders_block_notation_with_two_space_steps() {
        let expected = "\
[
  {
    path: \"\",
    pathMatch: \"full\"
  },
  {
    path: \"lazy\",
    loadChildren: [
      {
        path: \"\"
      }
    ]
  }
]";
        assert_eq!(render(&sample()), expected);
    }

    #[test]
    fn renders_empty_tree_as_brackets() {
        assert_eq!(render(&[]), "[]");
    }

    #[test]
    fn json_file_gets_trailing_newline_and_parent_dirs() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let file = dir.path().join("nested/out/routes.json");
        write_json(&sample(), &file).expect("write failed");
        let contents = fs::read_to_string(&file).expect("read failed");
        assert!(contents.ends_with("]\n"));
        assert!(contents.contains("\"loadChildren\": ["));
    }
}
