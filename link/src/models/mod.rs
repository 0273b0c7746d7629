//! Data models for airtable-link.
//!
//! Wire shapes of the list and write endpoints plus the client-side
//! addressing types built on top of them.

pub mod column;
pub mod error_detail;
pub mod list_params;
pub mod materialized_table;
pub mod mutation_request;
pub mod page;
pub mod record;
pub mod row_number;
pub mod table_locator;


pub use column::Column;
pub use error_detail::{remote_error_message, ErrorDetail, ErrorResponse};
pub use list_params::ListParams;
pub use materialized_table::MaterializedTable;
pub use mutation_request::{zip_fields, MutationOutcome, MutationRequest, MutationVerb, WriteBody};
pub use page::Page;
pub use record::Record;
pub use row_number::RowNumber;
pub use table_locator::TableLocator;
