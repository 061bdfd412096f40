//! Response-mapping helpers
//!
//! The upstream item payloads are deeply nested and loosely typed; the
//! accessors in the surface modules walk them best-effort. Absent fields
//! yield `None`, never errors.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Walk a dot-separated path through a JSON value. Numeric segments index
/// into arrays, everything else into objects.
pub(crate) fn json_at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Walk a path and read the value as a string
pub(crate) fn str_at<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    json_at(value, path)?.as_str()
}

/// Deserialize an optional count that the upstream sometimes sends as a
/// number and sometimes as a numeric string
pub(crate) fn de_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }))
}
