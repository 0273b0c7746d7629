use serde::{Deserialize, Serialize};

/// One field projected across every row, as three parallel sequences in
/// table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub values: Vec<String>,
    pub record_ids: Vec<String>,
    pub created_times: Vec<String>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn push(&mut self, value: String, record_id: String, created_time: String) {
        self.values.push(value);
        self.record_ids.push(record_id);
        self.created_times.push(created_time);
    }
}
