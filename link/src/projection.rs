//! Projection Extractors over a materialized snapshot.

use serde::{Deserialize, Serialize};

use crate::{
    error::{AirtableLinkError, Result},
    models::{Column, MaterializedTable, Record, RowNumber},
    resolver::resolve_row,
};

/// A single cell plus the identity of the record it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
    pub record_id: String,
    pub created_time: String,
}

fn field_of(record: &Record, field: &str) -> Result<String> {
    record
        .field(field)
        .ok_or_else(|| AirtableLinkError::FieldNotFound {
            field: field.to_string(),
            record_id: record.id.clone(),
        })
}

pub fn cell(table: &MaterializedTable, row: RowNumber, field: &str) -> Result<Cell> {
    let record = resolve_row(table, row)?;
    Ok(Cell {
        value: field_of(record, field)?,
        record_id: record.id.clone(),
        created_time: record.created_time.clone(),
    })
}

/// Project `field` across every record, in table order.
///
/// A record without the field fails the projection with
/// [`AirtableLinkError::FieldNotFound`] naming that record.
pub fn column(table: &MaterializedTable, field: &str) -> Result<Column> {
    let mut column = Column::default();
    for record in &table.records {
        column.push(
            field_of(record, field)?,
            record.id.clone(),
            record.created_time.clone(),
        );
    }
    Ok(column)
}

/// Every value of the record at `row`, in remote field order, without names.
pub fn row_values(table: &MaterializedTable, row: RowNumber) -> Result<Vec<String>> {
    resolve_row(table, row).map(Record::values)
}
