/// Parameters of a list request, shared by every page of one materialization.
///
/// # Examples
///
/// ```rust
/// use airtable_link::ListParams;
///
/// let params = ListParams::all_fields()
///     .with_field("Name")
///     .with_max_records(Some(50));
/// assert_eq!(params.fields, vec!["Name".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Requested field names; empty means all fields
    pub fields: Vec<String>,

    /// Upper bound on the number of records the remote returns overall
    pub max_records: Option<u32>,

    /// Records per page (remote accepts 1..=100)
    pub page_size: Option<u32>,
}

impl ListParams {
    pub fn all_fields() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    pub fn with_max_records(mut self, max_records: Option<u32>) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }
}
