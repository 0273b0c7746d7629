//! Row Resolver: 1-based row number to record identity.
//!
//! Always resolved against a snapshot taken for the current operation, so
//! row `k` means "the k-th record the remote lists right now".

use crate::{
    error::Result,
    models::{MaterializedTable, Record, RowNumber},
};

pub fn resolve_row(table: &MaterializedTable, row: RowNumber) -> Result<&Record> {
    let index = row.to_index(table.len())?;
    Ok(&table.records[index])
}

/// Stable remote id of the record at `row`.
pub fn resolve_record_id(table: &MaterializedTable, row: RowNumber) -> Result<String> {
    resolve_row(table, row).map(|record| record.id.clone())
}
