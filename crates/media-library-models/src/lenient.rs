//! Field deserializers that never fail.
//!
//! Stored records are schema-less JSON written by older clients, so every
//! field read goes through one of these: a missing, null or wrongly typed
//! value becomes the field's default instead of an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text field: strings pass through, numbers and booleans are stringified,
/// anything else is empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Non-negative counter: floats are truncated, negatives clamp to zero,
/// numeric strings are parsed, everything else is zero.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    })
}
