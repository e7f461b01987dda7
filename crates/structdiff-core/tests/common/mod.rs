use serde_json::Value;
use structdiff_core::model::{Container, DiffKind, DiffResult, Node};

/// Build a fresh diff root from a JSON literal
#[allow(dead_code)]
pub fn root(value: Value) -> Container {
    Container::from_json(&value).expect("test document root must be a container")
}

/// Compact `(kind, rendered path)` view of a result list for ordering assertions
#[allow(dead_code)]
pub fn outline(results: &[DiffResult]) -> Vec<(DiffKind, String)> {
    results
        .iter()
        .map(|r| (r.kind(), r.path().to_string()))
        .collect()
}

/// Unwrap an object-root container into its handle
#[allow(dead_code)]
pub fn object_of(container: &Container) -> structdiff_core::model::ObjectRef {
    match container {
        Container::Object(o) => o.clone(),
        Container::Array(_) => panic!("expected object root"),
    }
}

/// Leaf node from JSON
#[allow(dead_code)]
pub fn leaf(value: Value) -> Node {
    Node::from(value)
}
