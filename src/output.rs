//! JSON interop and output post-processing.
//!
//! Conversions between [`serde_json::Value`] and the engine's [`Value`],
//! plus the optional pass stripping missing leaves from a mapped result.

use std::collections::HashMap;

use crate::value::Value;

/// Convert a `serde_json::Value` into an engine value.
///
/// Integers are preserved separately from floats. JSON has no notion of a
/// missing value, so this never produces [`Value::Missing`].
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(from_json).collect()),
        serde_json::Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

/// Convert an engine value into a `serde_json::Value`.
///
/// Missing markers serialize as JSON null; strip first with
/// [`strip_missing`] when they should disappear instead.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Missing => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(to_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.iter().map(|(k, v)| (k.clone(), to_json(v))).collect(),
        ),
    }
}

/// Recursively remove missing leaves from a mapped tree.
///
/// Object keys holding a missing value are dropped; missing array elements
/// become null so that sibling indices keep their positions.
pub fn strip_missing(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_missing())
                .map(|(k, v)| (k, strip_missing(v)))
                .collect(),
        ),
        Value::Array(arr) => Value::Array(
            arr.into_iter()
                .map(|v| {
                    if v.is_missing() {
                        Value::Null
                    } else {
                        strip_missing(v)
                    }
                })
                .collect(),
        ),
        other => other,
    }
}
