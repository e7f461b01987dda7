//! Array pair handling.
//!
//! Called by the engine once both sides at a path are arrays and the pair has
//! been registered with the cycle tracker. Presence and kind mismatches never
//! reach this module.

use super::equality::equals;
use crate::model::{ArrayRef, DiffResult, Node, Path};
use crate::options::{ArrayEquality, ArrayPolicy, DiffOptions};

/// What the engine should do with an array pair
#[derive(Debug)]
pub enum ArrayDispatch {
    /// Walk the arrays index by index
    Recurse,
    /// Final results for this path; do not descend
    Resolved(Vec<DiffResult>),
}

/// Whole-array equality under the atomic policy.
pub fn arrays_equal(previous: &ArrayRef, current: &ArrayRef, equality: ArrayEquality) -> bool {
    match equality {
        ArrayEquality::Reference => previous.ptr_eq(current),
        ArrayEquality::Shallow => {
            if previous.ptr_eq(current) {
                return true;
            }
            let prev = previous.borrow();
            let cur = current.borrow();
            prev.len() == cur.len() && prev.iter().zip(cur.iter()).all(|(a, b)| equals(a, b))
        }
    }
}

pub fn dispatch(
    path: &Path,
    previous: &ArrayRef,
    current: &ArrayRef,
    options: &DiffOptions,
) -> ArrayDispatch {
    match options.array_policy {
        ArrayPolicy::Diff => ArrayDispatch::Recurse,
        ArrayPolicy::Atomic => {
            let equality = options.effective_array_equality().unwrap_or_default();
            if arrays_equal(previous, current, equality) {
                ArrayDispatch::Resolved(Vec::new())
            } else {
                ArrayDispatch::Resolved(vec![DiffResult::change(
                    path.clone(),
                    Node::Array(current.clone()),
                    Node::Array(previous.clone()),
                )])
            }
        }
        ArrayPolicy::Ignore => {
            tracing::trace!(path = %path, "array pair ignored");
            ArrayDispatch::Resolved(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Object, ObjectRef};

    fn numbers(values: &[i32]) -> ArrayRef {
        ArrayRef::new(values.iter().map(|v| Node::from(*v)).collect())
    }

    #[test]
    fn test_shallow_elementwise() {
        assert!(arrays_equal(
            &numbers(&[1, 2]),
            &numbers(&[1, 2]),
            ArrayEquality::Shallow
        ));
        assert!(!arrays_equal(
            &numbers(&[1, 2]),
            &numbers(&[1, 2, 3]),
            ArrayEquality::Shallow
        ));
        assert!(!arrays_equal(
            &numbers(&[1, 2]),
            &numbers(&[2, 1]),
            ArrayEquality::Shallow
        ));
    }

    #[test]
    fn test_shallow_is_one_level_deep() {
        let shared = ObjectRef::new(Object::new());
        let a = ArrayRef::new(vec![Node::Object(shared.clone())]);
        let b = ArrayRef::new(vec![Node::Object(shared)]);
        assert!(arrays_equal(&a, &b, ArrayEquality::Shallow));

        let c = ArrayRef::new(vec![Node::Object(ObjectRef::new(Object::new()))]);
        assert!(!arrays_equal(&a, &c, ArrayEquality::Shallow));
    }

    #[test]
    fn test_reference_requires_identity() {
        let a = numbers(&[1, 2]);
        assert!(arrays_equal(&a, &a.clone(), ArrayEquality::Reference));
        assert!(!arrays_equal(&a, &numbers(&[1, 2]), ArrayEquality::Reference));
    }

    #[test]
    fn test_dispatch_by_policy() {
        let path = Path::root().child("xs");
        let a = numbers(&[1]);
        let b = numbers(&[2]);

        let diff = DiffOptions::new();
        assert!(matches!(
            dispatch(&path, &a, &b, &diff),
            ArrayDispatch::Recurse
        ));

        let atomic = DiffOptions::new().with_array_policy(ArrayPolicy::Atomic);
        match dispatch(&path, &a, &b, &atomic) {
            ArrayDispatch::Resolved(results) => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].path(), &path);
            }
            ArrayDispatch::Recurse => panic!("atomic arrays must not recurse"),
        }

        let ignore = DiffOptions::new().with_array_policy(ArrayPolicy::Ignore);
        assert!(matches!(
            dispatch(&path, &a, &b, &ignore),
            ArrayDispatch::Resolved(ref results) if results.is_empty()
        ));
    }
}
