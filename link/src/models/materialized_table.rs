use super::Record;

/// All pages of one materialization, concatenated in arrival order.
///
/// Lives for a single logical operation and is never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializedTable {
    pub records: Vec<Record>,

    /// Status of the final page response
    pub status: u16,

    /// Number of page requests issued
    pub pages: u32,
}

impl MaterializedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id == id)
    }
}
