use serde::{Deserialize, Serialize};

use crate::error::{AirtableLinkError, Result};

/// Identifies the remote table a request targets.
///
/// Snapshotted at the start of every operation; later edits to the
/// configuration never affect a request already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLocator {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
    pub view_name: String,
}

impl TableLocator {
    pub fn new(
        api_key: impl Into<String>,
        base_id: impl Into<String>,
        table_name: impl Into<String>,
        view_name: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            table_name: table_name.into(),
            view_name: view_name.into(),
        }
    }

    /// Reject blank fields before any request is issued.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("api_key", &self.api_key),
            ("base_id", &self.base_id),
            ("table_name", &self.table_name),
            ("view_name", &self.view_name),
        ];
        for (name, value) in checks {
            if value.trim().is_empty() {
                return Err(AirtableLinkError::ConfigurationError(format!(
                    "{} must not be blank",
                    name
                )));
            }
        }
        Ok(())
    }
}
