//! Terminal events delivered for each caller-facing operation.
//!
//! Every dispatched operation produces exactly one [`TableEvent`]: its
//! success event or [`TableEvent::Failed`].

use std::fmt;

use crate::{error::AirtableLinkError, models::Record};

/// The eight caller-facing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    GetAllRows,
    GetCell,
    GetColumn,
    GetRow,
    SetCell,
    CreateRow,
    UpdateRowByNum,
    DeleteRowNum,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::GetAllRows => "GetAllRows",
            OperationKind::GetCell => "GetCell",
            OperationKind::GetColumn => "GetColumn",
            OperationKind::GetRow => "GetRow",
            OperationKind::SetCell => "SetCell",
            OperationKind::CreateRow => "CreateRow",
            OperationKind::UpdateRowByNum => "UpdateRowByNum",
            OperationKind::DeleteRowNum => "DeleteRowNum",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one operation, named after the event the runtime raises.
///
/// `status` is the HTTP status of the operation's final remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    GotAllRows {
        status: u16,
        records: Vec<Record>,
        total_rows: usize,
    },
    GotCell {
        status: u16,
        value: String,
        record_id: String,
        created_time: String,
    },
    GotColumn {
        status: u16,
        values: Vec<String>,
        record_ids: Vec<String>,
        created_times: Vec<String>,
    },
    GotRow {
        status: u16,
        values: Vec<String>,
    },
    CellChanged {
        status: u16,
    },
    RowCreated {
        status: u16,
    },
    RowUpdated {
        status: u16,
    },
    DeletedRowByNumber {
        status: u16,
    },
    Failed {
        operation: OperationKind,
        error: AirtableLinkError,
    },
}

impl TableEvent {
    pub fn failed(operation: OperationKind, error: AirtableLinkError) -> Self {
        TableEvent::Failed { operation, error }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::GotAllRows { .. } => "GotAllRows",
            TableEvent::GotCell { .. } => "GotCell",
            TableEvent::GotColumn { .. } => "GotColumn",
            TableEvent::GotRow { .. } => "GotRow",
            TableEvent::CellChanged { .. } => "CellChanged",
            TableEvent::RowCreated { .. } => "RowCreated",
            TableEvent::RowUpdated { .. } => "RowUpdated",
            TableEvent::DeletedRowByNumber { .. } => "DeletedRowByNumber",
            TableEvent::Failed { .. } => "OperationFailed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TableEvent::Failed { .. })
    }

    /// Status code for success events; failures carry the remote status if
    /// there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TableEvent::GotAllRows { status, .. }
            | TableEvent::GotCell { status, .. }
            | TableEvent::GotColumn { status, .. }
            | TableEvent::GotRow { status, .. }
            | TableEvent::CellChanged { status }
            | TableEvent::RowCreated { status }
            | TableEvent::RowUpdated { status }
            | TableEvent::DeletedRowByNumber { status } => Some(*status),
            TableEvent::Failed { error, .. } => error.status_code(),
        }
    }

    /// For `GotAllRows`, the records as a JSON array string.
    pub fn response_content(&self) -> Option<String> {
        match self {
            TableEvent::GotAllRows { records, .. } => serde_json::to_string(records).ok(),
            _ => None,
        }
    }
}
