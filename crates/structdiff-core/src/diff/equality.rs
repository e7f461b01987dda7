//! Leaf-value equality.
//!
//! Rules, first match wins:
//!
//! 1. Same primitive value, NaN equal to NaN, `+0` distinct from `-0`.
//! 2. Dates: equal timestamps (two invalid dates are equal).
//! 3. Patterns: equal `/source/flags` forms.
//! 4. Boxed primitives: unwrap, then rule 1.
//! 5. Everything else (containers, opaque values, mixed kinds): identity only.
//!
//! Deep comparison of containers is the engine's job, never this module's.

use crate::model::{Node, Primitive};

/// Numeric identity: NaN equals NaN, and zeros of different sign differ.
pub fn same_value(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    a == b && a.is_sign_negative() == b.is_sign_negative()
}

fn same_timestamp(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn primitive_equals(a: &Primitive, b: &Primitive) -> bool {
    match (a, b) {
        (Primitive::Number(x), Primitive::Number(y)) => same_value(*x, *y),
        (Primitive::String(x), Primitive::String(y)) => x == y,
        (Primitive::Bool(x), Primitive::Bool(y)) => x == y,
        (Primitive::BigInt(x), Primitive::BigInt(y)) => x == y,
        _ => false,
    }
}

/// Leaf equality between two nodes.
pub fn equals(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Null, Node::Null) => true,
        (Node::Bool(x), Node::Bool(y)) => x == y,
        (Node::Number(x), Node::Number(y)) => same_value(*x, *y),
        (Node::String(x), Node::String(y)) => x == y,
        (Node::BigInt(x), Node::BigInt(y)) => x == y,
        (Node::Date(x), Node::Date(y)) => same_timestamp(x.millis(), y.millis()),
        (Node::Pattern(x), Node::Pattern(y)) => x.canonical() == y.canonical(),
        (Node::Boxed(x), Node::Boxed(y)) => primitive_equals(x, y),
        (Node::Object(x), Node::Object(y)) => x.ptr_eq(y),
        (Node::Array(x), Node::Array(y)) => x.ptr_eq(y),
        (Node::Opaque(x), Node::Opaque(y)) => x.ptr_eq(y),
        _ => false,
    }
}
