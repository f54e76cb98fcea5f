//! Structured value helpers.
//!
//! Payloads are `serde_json::Value` trees: scalars, `Array` sequences and
//! `Object` mappings. A container always holds a mapping, represented as
//! [`Payload`]. Maps are key-sorted, so iteration order is deterministic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// The mapping held by a state container.
pub type Payload = Map<String, Value>;

/// Structural classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Null, bool, number or string
    Scalar,
    /// Ordered collection, compared as a whole when diffing
    Sequence,
    /// Named fields, walked key by key when diffing
    Mapping,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => ValueKind::Sequence,
            Value::Object(_) => ValueKind::Mapping,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                ValueKind::Scalar
            }
        }
    }
}

/// Human-readable type name used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Merge `patch` over `base` one level deep.
///
/// Fields named in `patch` replace same-named fields in `base` wholesale
/// (nested mappings are not merged); fields absent from `patch` are kept.
pub fn shallow_merge(base: &Payload, patch: &Payload) -> Payload {
    let mut merged = base.clone();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Deep structural equality with numeric comparison of numbers.
///
/// Unlike `Value`'s `PartialEq`, `1` and `1.0` are equal here.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => payloads_equal(xs, ys),
        _ => false,
    }
}

/// [`values_equal`] for two mappings.
pub fn payloads_equal(a: &Payload, b: &Payload) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (a.is_f64(), b.is_f64()) {
        (true, true) => a.as_f64() == b.as_f64(),
        (false, false) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_u64().is_some() && a.as_u64() == b.as_u64(),
        },
        (true, false) => float_equals_integer(a, b),
        (false, true) => float_equals_integer(b, a),
    }
}

/// Exact comparison: the float must be integral and convert back to the
/// same integer, so `2^53 + 1` and `2^53 as f64` differ.
fn float_equals_integer(float: &Number, int: &Number) -> bool {
    let Some(f) = float.as_f64() else {
        return false;
    };
    if !f.is_finite() || f.fract() != 0.0 {
        return false;
    }
    // i64::MIN and 2^64 are exactly representable as f64; any integral f
    // in [i64::MIN, 2^64) converts without rounding.
    if let Some(i) = int.as_i64() {
        (-9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0).contains(&f)
            && f as i64 == i
    } else if let Some(u) = int.as_u64() {
        (0.0..18_446_744_073_709_551_616.0).contains(&f) && f as u64 == u
    } else {
        false
    }
}
