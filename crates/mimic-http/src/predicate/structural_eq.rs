//! Structural equality over JSON values with containment semantics for objects.
//!
//! Objects match when every key of the left side is present on the right with a
//! structurally equal value. Keys that exist only on the right are ignored.
//! Arrays must match index by index.

use serde_json::{Number, Value};
use std::collections::HashSet;

/// Node identity pair already accepted during one comparison.
type VisitedPair = (*const Value, *const Value);

/// Deep, type-aware comparison of `a` against `b`.
///
/// - Differing variants are never equal.
/// - Arrays need equal length and pairwise equality in order.
/// - Objects need every key of `a` present in `b` with an equal value.
/// - Numbers compare by value, so `1` equals `1.0`.
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    let mut visited = HashSet::new();
    eq_inner(a, b, &mut visited)
}

fn eq_inner(a: &Value, b: &Value, visited: &mut HashSet<VisitedPair>) -> bool {
    match (a, b) {
        (Value::Array(left), Value::Array(right)) => {
            if left.len() != right.len() {
                return false;
            }
            // A pair seen before is already being compared further up the stack.
            if !visited.insert(identity(a, b)) {
                return true;
            }
            left.iter().zip(right).all(|(x, y)| eq_inner(x, y, visited))
        }
        (Value::Object(left), Value::Object(right)) => {
            if !visited.insert(identity(a, b)) {
                return true;
            }
            left.iter()
                .all(|(key, x)| right.get(key).is_some_and(|y| eq_inner(x, y, visited)))
        }
        (Value::Number(x), Value::Number(y)) => numbers_eq(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn identity(a: &Value, b: &Value) -> VisitedPair {
    (a as *const Value, b as *const Value)
}

fn numbers_eq(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    x.as_f64() == y.as_f64()
}
