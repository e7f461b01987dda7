//! Building graphs from `serde_json` documents.
//!
//! Every conversion allocates fresh containers, so two conversions of the same
//! document are structurally equal but never reference-identical.

use super::node::{ArrayRef, Container, Node, Object, ObjectRef};
use crate::errors::{DiffError, Result};
use serde_json::{Number, Value};

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_992;

fn number_to_node(number: &Number) -> Node {
    if let Some(n) = number.as_i64() {
        if n.unsigned_abs() > MAX_SAFE_INTEGER {
            return Node::BigInt(i128::from(n));
        }
        return Node::Number(n as f64);
    }
    if let Some(n) = number.as_u64() {
        if n > MAX_SAFE_INTEGER {
            return Node::BigInt(i128::from(n));
        }
        return Node::Number(n as f64);
    }
    Node::Number(number.as_f64().unwrap_or(f64::NAN))
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(*b),
            Value::Number(n) => number_to_node(n),
            Value::String(s) => Node::String(s.clone()),
            Value::Array(items) => {
                Node::Array(ArrayRef::new(items.iter().map(Node::from).collect()))
            }
            Value::Object(map) => {
                let mut object = Object::new();
                for (key, value) in map {
                    object.insert(key.clone(), Node::from(value));
                }
                Node::Object(ObjectRef::new(object))
            }
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from(&value)
    }
}

impl Container {
    /// Convert a JSON document whose root is an object or array.
    ///
    /// # Errors
    ///
    /// - `NotAContainer` if the document root is a scalar
    pub fn from_json(value: &Value) -> Result<Container> {
        let node = Node::from(value);
        node.as_container().ok_or_else(|| DiffError::NotAContainer {
            found: node.type_name().to_string(),
        })
    }

    /// Parse JSON text and convert its root.
    ///
    /// # Errors
    ///
    /// - `DocumentParse` if the text is not valid JSON
    /// - `NotAContainer` if the document root is a scalar
    pub fn from_json_str(source: &str, text: &str) -> Result<Container> {
        let value: Value = serde_json::from_str(text).map_err(|e| DiffError::DocumentParse {
            source_name: source.to_string(),
            reason: e.to_string(),
        })?;
        Container::from_json(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_key_order_follows_document() {
        let node = Node::from(json!({"z": 1, "a": 2, "m": 3}));
        let Node::Object(object) = node else {
            panic!("expected object");
        };
        let keys: Vec<String> = object.borrow().own_keys().map(String::from).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_large_integers_become_bigint() {
        assert_eq!(Node::from(json!(42)), Node::Number(42.0));
        assert_eq!(Node::from(json!(-7)), Node::Number(-7.0));
        assert_eq!(
            Node::from(json!(u64::MAX)),
            Node::BigInt(i128::from(u64::MAX))
        );
        assert_eq!(
            Node::from(json!(i64::MIN)),
            Node::BigInt(i128::from(i64::MIN))
        );
        assert_eq!(Node::from(json!(1.5)), Node::Number(1.5));
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        let err = Container::from_json(&json!(42)).unwrap_err();
        assert_eq!(
            err,
            DiffError::NotAContainer {
                found: "number".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_json_text() {
        let err = Container::from_json_str("prev.json", "{not json").unwrap_err();
        assert!(matches!(err, DiffError::DocumentParse { .. }));
    }

    #[test]
    fn test_array_root_is_accepted() {
        let root = Container::from_json(&json!([1, 2])).unwrap();
        assert!(matches!(root, Container::Array(ref a) if a.len() == 2));
    }
}
