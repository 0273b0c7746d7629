use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AirtableLinkError, Result};

/// Kind of remote write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationVerb {
    /// POST a new record; no target identity
    Create,
    /// PUT the supplied fields as the record's full contents
    Update,
    /// PATCH a single field, leaving the others untouched
    UpdateCell,
    /// DELETE the record
    Delete,
}

impl MutationVerb {
    pub fn method(self) -> reqwest::Method {
        match self {
            MutationVerb::Create => reqwest::Method::POST,
            MutationVerb::Update => reqwest::Method::PUT,
            MutationVerb::UpdateCell => reqwest::Method::PATCH,
            MutationVerb::Delete => reqwest::Method::DELETE,
        }
    }

    pub fn needs_target(self) -> bool {
        !matches!(self, MutationVerb::Create)
    }
}

/// A single remote write, addressed by record identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub target: Option<String>,
    pub fields: IndexMap<String, String>,
    pub verb: MutationVerb,
}

impl MutationRequest {
    pub fn create(fields: IndexMap<String, String>) -> Self {
        Self {
            target: None,
            fields,
            verb: MutationVerb::Create,
        }
    }

    pub fn update(target: impl Into<String>, fields: IndexMap<String, String>) -> Self {
        Self {
            target: Some(target.into()),
            fields,
            verb: MutationVerb::Update,
        }
    }

    pub fn update_cell(
        target: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(field.into(), value.into());
        Self {
            target: Some(target.into()),
            fields,
            verb: MutationVerb::UpdateCell,
        }
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            fields: IndexMap::new(),
            verb: MutationVerb::Delete,
        }
    }
}

/// Pair column names with values for a create/update.
///
/// Lists of unequal length are rejected instead of silently truncated.
pub fn zip_fields(names: &[String], values: &[String]) -> Result<IndexMap<String, String>> {
    if names.len() != values.len() {
        return Err(AirtableLinkError::MismatchedColumns {
            names: names.len(),
            values: values.len(),
        });
    }
    Ok(names.iter().cloned().zip(values.iter().cloned()).collect())
}

/// JSON body of POST/PUT/PATCH requests.
#[derive(Debug, Clone, Serialize)]
pub struct WriteBody<'a> {
    pub fields: &'a IndexMap<String, String>,
    pub typecast: bool,
}

/// What a successful write reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub status: u16,

    /// Identity echoed by the remote (the new id for a create)
    pub record_id: Option<String>,
}
