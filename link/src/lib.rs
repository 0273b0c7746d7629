//! # airtable-link
//!
//! Client library for reading and writing Airtable tables addressed by
//! 1-based row number.
//!
//! Every read materializes the configured view across all pages, following
//! the remote cursor until it disappears. Row-addressed writes resolve the
//! row number against a fresh snapshot and then act on the record id.
//!
//! Two layers are exposed:
//!
//! - [`AirtableClient`] / [`Table`]: plain async calls returning `Result`
//! - [`AirtableComponent`]: fire-and-forget operations whose outcome is
//!   delivered as a named [`TableEvent`] on a single [`EventStream`]
//!
//! # Example
//!
//! ```rust,no_run
//! use airtable_link::{AirtableClient, AirtableComponent, TableEvent};
//! use tokio::runtime::Handle;
//!
//! # async fn example() -> airtable_link::Result<()> {
//! let client = AirtableClient::builder().build()?;
//! let (component, mut events) = AirtableComponent::new(client, Handle::current());
//! component.set_api_key("patXXXXXXXX");
//! component.set_base_id("appXXXXXXXX");
//!
//! component.get_cell(1, "Name");
//! while let Some(delivery) = events.next().await {
//!     if let TableEvent::GotCell { value, .. } = delivery.event {
//!         println!("row 1: {}", value);
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod component;
pub mod config;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod event_handlers;
pub mod events;
pub mod fetcher;
pub mod materializer;
pub mod models;
pub mod mutation;
pub mod normalize;
pub mod projection;
pub mod resolver;
pub mod timeouts;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use auth::AuthProvider;
pub use client::{AirtableClient, AirtableClientBuilder, Fetched, Table};
pub use component::AirtableComponent;
pub use config::LinkConfig;
pub use dispatcher::{
    AsyncDispatcher, Delivery, EventSink, EventStream, InvocationHandle, InvocationState,
};
pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub use error::{AirtableLinkError, Result};
pub use event_handlers::DispatchHooks;
pub use events::{OperationKind, TableEvent};
pub use models::{
    Column, ListParams, MaterializedTable, MutationOutcome, MutationRequest, MutationVerb, Page,
    Record, RowNumber, TableLocator,
};
pub use projection::Cell;
pub use timeouts::LinkTimeouts;
pub use transport::{
    ReqwestTransport, SharedTransport, Transport, TransportRequest, TransportResponse,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
