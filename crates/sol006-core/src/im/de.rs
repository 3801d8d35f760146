//! Lenient field decoders for IM leaves
//!
//! IM documents are usually hand-written YAML, so numeric leaves show up as
//! either integers or quoted strings (`count: '1'`) and identifiers show up
//! as bare numbers (`member-vnf-index-ref: 1`). These helpers accept both
//! shapes and normalize them.

use serde::de::{Deserialize, Deserializer, Error as _};
use serde_json::Value;

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Render a string or number leaf as a string
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a non-negative integer from a number or a numeric string
pub(crate) fn scalar_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value).ok_or_else(|| {
        D::Error::custom(format!("expected a string or number, found {}", type_name(&value)))
    })
}

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => scalar_to_string(&value).map(Some).ok_or_else(|| {
            D::Error::custom(format!("expected a string or number, found {}", type_name(&value)))
        }),
    }
}

pub(crate) fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => scalar_to_u64(&value).map(Some).ok_or_else(|| {
            D::Error::custom(format!("expected a non-negative integer, found {}", value))
        }),
    }
}

pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => scalar_to_f64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, found {}", value))),
    }
}

/// Decode a list that may be written as an explicit null (`vdu:` with no items)
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whether a decoded leaf counts as "set"
///
/// Null, `false`, zero, and empty strings, lists, or mappings are all unset;
/// optional output keys are only emitted for set leaves.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// The passthrough value, if it is set
pub(crate) fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| is_truthy(v))
}

/// The string, if it is non-empty
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// The number, if it is non-zero
pub(crate) fn non_zero(value: Option<u64>) -> Option<u64> {
    value.filter(|n| *n != 0)
}
