use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::normalize::{deserialize_fields, value_to_string};

/// One remote row.
///
/// `id` and `created_time` are assigned by the remote service and treated
/// as opaque; the client never invents either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,

    #[serde(rename = "createdTime", default)]
    pub created_time: String,

    /// Raw field values in remote iteration order. Empty cells are omitted
    /// by the remote, so a field known to the table may be absent here.
    #[serde(default, deserialize_with = "deserialize_fields")]
    pub fields: IndexMap<String, JsonValue>,
}

impl Record {
    /// Value of `name` rendered as a string.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(value_to_string)
    }

    /// All field values as strings, without names, in field order.
    pub fn values(&self) -> Vec<String> {
        self.fields.values().map(value_to_string).collect()
    }
}
