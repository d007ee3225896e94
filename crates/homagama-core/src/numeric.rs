//! Lenient numeric coercion for upstream JSON payloads.
//!
//! Neither the weather API nor the prediction service is schema-checked.
//! Every numeric field is coerced with one rule and NaN stands for "missing";
//! the formatters turn NaN into a placeholder.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an arbitrary JSON value into a number.
///
/// Numbers pass through, numeric strings are parsed after trimming, booleans
/// become 1/0. `null`, empty strings, arrays, objects and unparseable strings
/// become NaN.
pub fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                f64::NAN
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Null | Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Serde default for numeric fields that may be absent.
pub fn nan() -> f64 {
    f64::NAN
}

/// `deserialize_with` helper for a single leniently coerced number.
///
/// Pair with `#[serde(default = "homagama_core::numeric::nan")]` so that an
/// absent field also lands as NaN.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// `deserialize_with` helper for a sequence of leniently coerced numbers.
///
/// Anything that is not a JSON array reads as an empty sequence.
pub fn lenient_f64_seq<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(coerce_f64).collect(),
        _ => Vec::new(),
    })
}
