//! Scenario tests for the diff engine: results, values and ordering.

mod common;

use common::{leaf, outline, root};
use serde_json::json;
use structdiff_core::diff::diff;
use structdiff_core::model::{DiffKind, DiffResult, Node, Path};
use structdiff_core::options::DiffOptions;

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_remove_change_create_at_top_level() {
    let previous = root(json!({"a": 1, "b": 2}));
    let current = root(json!({"b": 3, "c": 4}));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(
        results,
        vec![
            DiffResult::remove(Path::root().child("a"), Node::from(1)),
            DiffResult::change(Path::root().child("b"), Node::from(3), Node::from(2)),
            DiffResult::create(Path::root().child("c"), Node::from(4)),
        ]
    );
}

#[test]
fn test_array_shrink_by_index() {
    let previous = root(json!({"list": [1, 2, 3]}));
    let current = root(json!({"list": [1, 3]}));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(
        results,
        vec![
            DiffResult::change(
                Path::root().child("list").child(1usize),
                Node::from(3),
                Node::from(2)
            ),
            DiffResult::remove(Path::root().child("list").child(2usize), Node::from(3)),
        ]
    );
}

#[test]
fn test_array_growth_creates_tail_indices() {
    let previous = root(json!([1]));
    let current = root(json!([1, 2, 3]));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(
        outline(&results),
        vec![
            (DiffKind::Create, "[1]".to_string()),
            (DiffKind::Create, "[2]".to_string()),
        ]
    );
}

#[test]
fn test_self_diff_is_empty() {
    let doc = json!({
        "name": "x",
        "tags": ["a", "b"],
        "nested": {"deep": {"list": [{"k": 1}, null, true]}},
        "n": 1.5
    });
    let a = root(doc.clone());
    let b = root(doc);

    assert!(diff(&a, &a, &DiffOptions::default()).is_empty());
    assert!(diff(&a, &b, &DiffOptions::default()).is_empty());
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn test_nested_results_spliced_at_originating_key() {
    let previous = root(json!({"a": {"x": 1}, "b": 1}));
    let current = root(json!({"c": 1, "a": {"x": 2, "y": 3}}));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(
        outline(&results),
        vec![
            (DiffKind::Change, "a.x".to_string()),
            (DiffKind::Create, "a.y".to_string()),
            (DiffKind::Remove, "b".to_string()),
            (DiffKind::Create, "c".to_string()),
        ]
    );
}

#[test]
fn test_walk_follows_previous_key_order_then_current() {
    let previous = root(json!({"z": 1, "m": 1, "a": 1}));
    let current = root(json!({"q": 2, "a": 2, "z": 2, "b": 2}));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(
        outline(&results),
        vec![
            (DiffKind::Change, "z".to_string()),
            (DiffKind::Remove, "m".to_string()),
            (DiffKind::Change, "a".to_string()),
            (DiffKind::Create, "q".to_string()),
            (DiffKind::Create, "b".to_string()),
        ]
    );
}

#[test]
fn test_whole_subtree_created_as_one_event() {
    let previous = root(json!({}));
    let current = root(json!({"cfg": {"a": [1, 2], "b": {"c": 3}}}));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), DiffKind::Create);
    assert!(matches!(results[0].value(), Some(Node::Object(_))));
}

#[test]
fn test_deterministic_output() {
    let previous = root(json!({"a": [1, {"b": 2}], "c": "x"}));
    let current = root(json!({"a": [2, {"b": 3, "d": 4}], "e": null}));

    let first = diff(&previous, &current, &DiffOptions::default());
    let second = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(outline(&first), outline(&second));
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Kinds and leaves
// ---------------------------------------------------------------------------

#[test]
fn test_object_to_array_is_replacement() {
    let previous = root(json!({"v": {"0": "a"}}));
    let current = root(json!({"v": ["a"]}));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(outline(&results), vec![(DiffKind::Change, "v".to_string())]);
    assert!(matches!(results[0].value(), Some(Node::Array(_))));
    assert!(matches!(results[0].old_value(), Some(Node::Object(_))));
}

#[test]
fn test_null_to_value_is_change() {
    let previous = root(json!({"v": null}));
    let current = root(json!({"v": 0}));

    let results = diff(&previous, &current, &DiffOptions::default());

    assert_eq!(
        results,
        vec![DiffResult::change(
            Path::root().child("v"),
            leaf(json!(0)),
            Node::Null
        )]
    );
}

#[test]
fn test_nan_and_signed_zero_leaves() {
    let previous = common::object_of(&root(json!({"n": 0, "z": 0})));
    let current = common::object_of(&root(json!({"n": 0, "z": 0})));

    // JSON has neither NaN nor -0, so patch them in
    previous.borrow_mut().insert("n", Node::Number(f64::NAN));
    current.borrow_mut().insert("n", Node::Number(f64::NAN));
    current.borrow_mut().insert("z", Node::Number(-0.0));

    let results = diff(&previous.into(), &current.into(), &DiffOptions::default());

    assert_eq!(outline(&results), vec![(DiffKind::Change, "z".to_string())]);
}

#[test]
fn test_rich_leaves_compare_by_value() {
    let previous = common::object_of(&root(json!({})));
    let current = common::object_of(&root(json!({})));
    {
        let mut p = previous.borrow_mut();
        p.insert("when", Node::date_millis(1_000.0));
        p.insert("re", Node::pattern("ab+", "g"));
        p.insert("moved", Node::date_millis(1_000.0));
    }
    {
        let mut c = current.borrow_mut();
        c.insert("when", Node::date_millis(1_000.0));
        c.insert("re", Node::pattern("ab+", "g"));
        c.insert("moved", Node::date_millis(2_000.0));
    }

    let results = diff(&previous.into(), &current.into(), &DiffOptions::default());

    assert_eq!(
        outline(&results),
        vec![(DiffKind::Change, "moved".to_string())]
    );
}

#[test]
fn test_opaque_values_compare_by_identity() {
    let shared = Node::opaque(String::from("handle"));
    let previous = common::object_of(&root(json!({})));
    let current = common::object_of(&root(json!({})));
    previous.borrow_mut().insert("same", shared.clone());
    current.borrow_mut().insert("same", shared);
    previous
        .borrow_mut()
        .insert("other", Node::opaque(String::from("handle")));
    current
        .borrow_mut()
        .insert("other", Node::opaque(String::from("handle")));

    let results = diff(&previous.into(), &current.into(), &DiffOptions::default());

    assert_eq!(
        outline(&results),
        vec![(DiffKind::Change, "other".to_string())]
    );
}

#[test]
fn test_inputs_are_not_mutated() {
    let previous = root(json!({"a": [1, 2], "b": {"c": 1}}));
    let current = root(json!({"a": [3], "d": 1}));

    let _ = diff(&previous, &current, &DiffOptions::default());

    let prev_keys: Vec<String> = common::object_of(&previous)
        .borrow()
        .own_keys()
        .map(String::from)
        .collect();
    let cur_keys: Vec<String> = common::object_of(&current)
        .borrow()
        .own_keys()
        .map(String::from)
        .collect();
    assert_eq!(prev_keys, vec!["a", "b"]);
    assert_eq!(cur_keys, vec!["a", "d"]);
}
