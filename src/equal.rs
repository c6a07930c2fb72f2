//! The equality engine.
//!
//! Decides whether two converted values are equal under a layered strategy,
//! first applicable rule wins:
//!
//! 1. Nil handling: two nil values are equal only when their concrete type
//!    names match; nil against anything present is never equal.
//! 2. Custom protocol: two [`Kind::Custom`] values of the same concrete type
//!    are decided by the type's own [`Equiv`](crate::Equiv) method, full stop.
//! 3. Different concrete types are unequal, even when the payloads would
//!    otherwise look alike (`42i32` vs `42i64`, `42` vs `"42"`).
//! 4. Structural recursion: primitives by value, sequences element-wise in
//!    order, maps as key-value sets, records field by field.
//! 5. Timestamps compare by instant, irrespective of offset representation.

use crate::value::{Kind, Value};

/// Deep equality between two runtime values.
pub fn equal(got: &Value, want: &Value) -> bool {
    match (got.kind(), want.kind()) {
        (Kind::Nil, Kind::Nil) => got.type_name() == want.type_name(),
        (Kind::Nil, _) | (_, Kind::Nil) => false,
        (Kind::Custom(a), Kind::Custom(b)) => a.matches(b),
        _ if got.type_name() != want.type_name() => false,
        (Kind::Bool(a), Kind::Bool(b)) => a == b,
        (Kind::Int(a), Kind::Int(b)) => a == b,
        (Kind::Uint(a), Kind::Uint(b)) => a == b,
        (Kind::Byte(a), Kind::Byte(b)) => a == b,
        // NaN is never equal to itself, matching float semantics.
        (Kind::Float(a), Kind::Float(b)) => a == b,
        (Kind::Char(a), Kind::Char(b)) => a == b,
        (Kind::Str(a), Kind::Str(b)) => a == b,
        (Kind::Seq(a), Kind::Seq(b)) | (Kind::Tuple(a), Kind::Tuple(b)) => seq_equal(a, b),
        (Kind::Map(a), Kind::Map(b)) => map_equal(a, b),
        (Kind::Record { fields: a }, Kind::Record { fields: b }) => record_equal(a, b),
        // chrono compares the instant, not the offset.
        (Kind::Time(a), Kind::Time(b)) => a == b,
        _ => false,
    }
}

/// True iff `got` equals any of `wants`.
pub fn equal_any(got: &Value, wants: &[Value]) -> bool {
    wants.iter().any(|w| equal(got, w))
}

fn seq_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equal(x, y))
}

// Order-insensitive: every entry on one side must have a matching entry on
// the other. Quadratic, which is fine for assertion-sized maps.
fn map_equal(a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(k, v)| b.iter().any(|(k2, v2)| equal(k, k2) && equal(v, v2)))
}

fn record_equal(a: &[(&'static str, Value)], b: &[(&'static str, Value)]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|((name_a, v_a), (name_b, v_b))| name_a == name_b && equal(v_a, v_b))
}
