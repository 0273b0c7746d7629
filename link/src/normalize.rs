//! Field-value normalization for records.
//!
//! The remote service returns typed cell values (strings, numbers, booleans,
//! attachment arrays, linked-record lists). Records keep the raw values in
//! remote field order; projections coerce them to strings on the way out.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Render one remote cell value as a string.
///
/// Strings are taken verbatim, `null` becomes the empty string and every
/// other value becomes its compact JSON text.
pub fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Deserialize a `fields` object into an ordered name -> value map.
///
/// A `null` object yields an empty map.
pub(crate) fn deserialize_fields<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, JsonValue>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}
