use std::fmt;

use crate::error::{AirtableLinkError, Result};

/// 1-based ordinal position inside a materialized snapshot.
///
/// Purely client-side; the remote service has no notion of row numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowNumber(pub usize);

impl RowNumber {
    /// Zero-based index into a snapshot of `len` records.
    pub fn to_index(self, len: usize) -> Result<usize> {
        if self.0 == 0 || self.0 > len {
            return Err(AirtableLinkError::RowOutOfRange { row: self.0, len });
        }
        Ok(self.0 - 1)
    }
}

impl From<usize> for RowNumber {
    fn from(row: usize) -> Self {
        Self(row)
    }
}

impl fmt::Display for RowNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
