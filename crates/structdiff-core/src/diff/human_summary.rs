//! Human-readable summary renderer for diff results.

use crate::model::{DiffKind, DiffResult, Node, Primitive};

/// Render a human-readable Markdown/text summary of a diff.
///
/// One bullet per result, in result order. The summary is informational
/// only; nothing parses it back.
pub fn render_human_summary(results: &[DiffResult]) -> String {
    let mut out = String::new();

    out.push_str("## Structural Diff\n\n");

    if results.is_empty() {
        out.push_str("_No differences detected._\n");
        return out;
    }

    let count = |kind: DiffKind| results.iter().filter(|r| r.kind() == kind).count();
    out.push_str(&format!(
        "**Differences**: {} ({} removed, {} changed, {} created)\n\n",
        results.len(),
        count(DiffKind::Remove),
        count(DiffKind::Change),
        count(DiffKind::Create),
    ));

    for result in results {
        let line = match result {
            DiffResult::Create { path, value } => {
                format!("- {} `{}`: {}\n", DiffKind::Create, path, render_node(value))
            }
            DiffResult::Remove { path, old_value } => {
                format!(
                    "- {} `{}`: {}\n",
                    DiffKind::Remove,
                    path,
                    render_node(old_value)
                )
            }
            DiffResult::Change {
                path,
                value,
                old_value,
            } => format!(
                "- {} `{}`: {} → {}\n",
                DiffKind::Change,
                path,
                render_node(old_value),
                render_node(value)
            ),
        };
        out.push_str(&line);
    }

    out
}

fn render_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 && n.is_sign_negative() {
        "-0".to_string()
    } else {
        // f64 Display already drops a trailing ".0"
        format!("{}", n)
    }
}

fn render_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Compact one-line rendering of a node. Containers are not expanded.
pub fn render_node(node: &Node) -> String {
    match node {
        Node::Null => "null".to_string(),
        Node::Bool(b) => b.to_string(),
        Node::Number(n) => render_number(*n),
        Node::String(s) => render_string(s),
        Node::BigInt(n) => format!("{}n", n),
        Node::Date(date) => match date.to_datetime() {
            Some(at) => format!("Date({})", at.to_rfc3339()),
            // valid but outside the calendar range chrono can represent
            None if date.is_valid() => format!("Date({}ms)", render_number(date.millis())),
            None => "Date(invalid)".to_string(),
        },
        Node::Pattern(pattern) => pattern.canonical(),
        Node::Boxed(primitive) => {
            let inner = match primitive {
                Primitive::Number(n) => render_number(*n),
                Primitive::String(s) => render_string(s),
                Primitive::Bool(b) => b.to_string(),
                Primitive::BigInt(n) => format!("{}n", n),
            };
            format!("Boxed({})", inner)
        }
        Node::Object(object) => {
            let keys = object.borrow().len();
            if keys == 1 {
                "{…; 1 key}".to_string()
            } else {
                format!("{{…; {} keys}}", keys)
            }
        }
        Node::Array(array) => format!("[…; {}]", array.len()),
        Node::Opaque(_) => "<opaque>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Path;

    #[test]
    fn test_empty_summary() {
        let summary = render_human_summary(&[]);
        assert!(summary.contains("No differences detected"));
    }

    #[test]
    fn test_summary_lists_results_in_order() {
        let results = vec![
            DiffResult::remove(Path::root().child("a"), Node::from(1)),
            DiffResult::change(Path::root().child("b"), Node::from(3), Node::from(2)),
            DiffResult::create(Path::root().child("c"), Node::from("four")),
        ];
        let summary = render_human_summary(&results);

        assert!(summary.contains("**Differences**: 3 (1 removed, 1 changed, 1 created)"));
        let remove_at = summary.find("- REMOVE `a`: 1").unwrap();
        let change_at = summary.find("- CHANGE `b`: 2 → 3").unwrap();
        let create_at = summary.find("- CREATE `c`: \"four\"").unwrap();
        assert!(remove_at < change_at && change_at < create_at);
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(render_node(&Node::Number(1.0)), "1");
        assert_eq!(render_node(&Node::Number(1.5)), "1.5");
        assert_eq!(render_node(&Node::Number(-0.0)), "-0");
        assert_eq!(render_node(&Node::Number(f64::NAN)), "NaN");
        assert_eq!(render_node(&Node::Number(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(render_node(&Node::BigInt(12)), "12n");
    }

    #[test]
    fn test_render_rich_leaves() {
        assert_eq!(render_node(&Node::pattern("x", "g")), "/x/g");
        assert_eq!(render_node(&Node::date_millis(0.0)), "Date(1970-01-01T00:00:00+00:00)");
        assert_eq!(render_node(&Node::date_millis(f64::NAN)), "Date(invalid)");
        assert_eq!(render_node(&Node::date_millis(1e300)), format!("Date({}ms)", 1e300));
        assert_eq!(
            render_node(&Node::date_millis(f64::NEG_INFINITY)),
            "Date(-Infinityms)"
        );
        assert_eq!(
            render_node(&Node::Boxed(Primitive::String("s".into()))),
            "Boxed(\"s\")"
        );
    }

    #[test]
    fn test_render_containers_compactly() {
        assert_eq!(render_node(&Node::object([("a", 1), ("b", 2)])), "{…; 2 keys}");
        assert_eq!(render_node(&Node::object([("a", 1)])), "{…; 1 key}");
        assert_eq!(render_node(&Node::array([1, 2, 3])), "[…; 3]");
    }
}
