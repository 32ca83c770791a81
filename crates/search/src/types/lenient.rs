//! Lenient serde helpers for fields that arrive as either strings or numbers.
//!
//! Index sources and grid clients are not consistent about whether a block,
//! lot or group key is `"013"` or `13`; these helpers accept both.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional scalar into a string.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(other) => scalar_to_string(&other)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected string or number, found {}", other))),
    }
}

/// Deserializes an optional scalar into a float.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, found '{}'", s))),
        Some(other) => Err(de::Error::custom(format!(
            "expected number or string, found {}",
            other
        ))),
    }
}

/// Deserializes a possibly-null list of scalars into strings.
pub(crate) fn strings_or_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    values
        .iter()
        .map(|v| {
            scalar_to_string(v)
                .ok_or_else(|| de::Error::custom(format!("expected string or number, found {}", v)))
        })
        .collect()
}

/// Renders a JSON scalar as a string. Returns `None` for null, arrays and objects.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerces a JSON scalar into a JSON number the way the grid's numeric
/// identifiers are cast: `"013"` becomes `13`, `"12.5"` becomes `12.5`.
///
/// Integral values stay integers so they compare equal to integer-mapped
/// sub-fields. Blank strings and non-numeric input yield `None`.
pub(crate) fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => Some(Value::Number(n.clone())),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(i) = s.parse::<i64>() {
                return Some(Value::from(i));
            }
            let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Some(Value::from(f as i64))
            } else {
                serde_json::Number::from_f64(f).map(Value::Number)
            }
        }
        _ => None,
    }
}
