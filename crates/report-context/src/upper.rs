//! Recursive uppercase transform over a JSON value tree.

use serde_json::Value;

/// Uppercase every string in a value, recursing through objects and
/// arrays. Numbers, booleans and nulls pass through unchanged.
pub fn deep_uppercase(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_uppercase()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, deep_uppercase(v)))
                .collect(),
        ),
        Value::Array(seq) => Value::Array(seq.into_iter().map(deep_uppercase).collect()),
        other => other,
    }
}
