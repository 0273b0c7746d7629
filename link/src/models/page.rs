use serde::Deserialize;

use super::Record;

/// One page of a list response.
///
/// `cursor` is the opaque `offset` token; `None` means this was the last page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub records: Vec<Record>,

    #[serde(rename = "offset", default)]
    pub cursor: Option<String>,

    /// HTTP status of the response that carried this page
    #[serde(skip)]
    pub status: u16,
}

impl Page {
    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }
}
