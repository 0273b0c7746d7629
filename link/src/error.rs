//! Error types for airtable-link.
//!
//! Every public operation terminates in either a value or one of these
//! variants. Nothing is retried automatically.

use thiserror::Error;

/// Result type for airtable-link operations
pub type Result<T> = std::result::Result<T, AirtableLinkError>;

/// Errors that can occur while reading or writing a remote table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AirtableLinkError {
    /// Network, connect or timeout failure before any response arrived
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The remote service answered with a non-success status
    #[error("Remote error ({status_code}): {message}")]
    RemoteError { status_code: u16, message: String },

    /// The 1-based row number does not address a record in the snapshot
    #[error("Row {row} is out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// The requested field is absent from the resolved record
    #[error("Field '{field}' not found on record {record_id}")]
    FieldNotFound { field: String, record_id: String },

    /// A required locator or client setting is blank or invalid
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A response or request body could not be (de)serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The remote kept issuing cursors beyond the configured page cap
    #[error("Page limit of {limit} exceeded while following cursors")]
    PageLimitExceeded { limit: u32 },

    /// Column names and values passed to a write have different lengths
    #[error("Got {names} column names but {values} values")]
    MismatchedColumns { names: usize, values: usize },

    /// A background worker died before producing an outcome
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AirtableLinkError {
    pub fn remote(status_code: u16, message: impl Into<String>) -> Self {
        Self::RemoteError {
            status_code,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteError { .. })
    }

    /// HTTP status carried by a [`RemoteError`](Self::RemoteError), if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AirtableLinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AirtableLinkError::TransportError(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            AirtableLinkError::TransportError(format!("Connection failed: {}", err))
        } else {
            AirtableLinkError::TransportError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AirtableLinkError {
    fn from(err: serde_json::Error) -> Self {
        AirtableLinkError::SerializationError(err.to_string())
    }
}
