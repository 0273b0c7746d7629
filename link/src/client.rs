//! Airtable client with builder pattern.
//!
//! [`AirtableClient`] holds the transport and client-wide options.
//! [`AirtableClient::table`] binds it to a validated [`TableLocator`] and
//! returns a [`Table`] exposing the read and write operations.
//!
//! Every row-addressed operation materializes the whole table first and
//! resolves the row number against that fresh snapshot, so a write costs
//! one full read (all pages) plus the write itself. Identities are never
//! cached across calls.

use std::sync::Arc;

use crate::{
    endpoint::{Endpoint, DEFAULT_BASE_URL},
    error::{AirtableLinkError, Result},
    fetcher::PageFetcher,
    materializer::TableMaterializer,
    models::{
        zip_fields, Column, ListParams, MaterializedTable, MutationOutcome, MutationRequest,
        RowNumber, TableLocator,
    },
    mutation::MutationExecutor,
    projection::{self, Cell},
    resolver::resolve_record_id,
    timeouts::LinkTimeouts,
    transport::{ReqwestTransport, SharedTransport},
};

/// Largest page size the remote accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A projected value together with the status of the final page response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub status: u16,
    pub value: T,
}

/// Main Airtable client.
///
/// # Examples
///
/// ```rust,no_run
/// use airtable_link::{AirtableClient, TableLocator};
///
/// # async fn example() -> airtable_link::Result<()> {
/// let client = AirtableClient::builder().max_pages(Some(500)).build()?;
/// let table = client.table(TableLocator::new("patKEY", "appBASE", "Table 1", "Grid view"))?;
///
/// let names = table.column("Name", None).await?;
/// println!("{} names", names.value.len());
///
/// table.set_cell(2, "Name", "Grace").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AirtableClient {
    endpoint: Endpoint,
    transport: SharedTransport,
    max_pages: Option<u32>,
    page_size: Option<u32>,
    typecast: bool,
}

impl AirtableClient {
    pub fn builder() -> AirtableClientBuilder {
        AirtableClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.base_url().as_str()
    }

    /// Bind to one remote table. Blank locator fields are rejected here,
    /// before anything is sent.
    pub fn table(&self, locator: TableLocator) -> Result<Table> {
        locator.validate()?;
        let fetcher = PageFetcher::new(self.endpoint.clone(), Arc::clone(&self.transport));
        Ok(Table {
            locator,
            materializer: TableMaterializer::new(fetcher, self.max_pages),
            executor: MutationExecutor::new(
                self.endpoint.clone(),
                Arc::clone(&self.transport),
                self.typecast,
            ),
            page_size: self.page_size,
        })
    }
}

/// Operations against one remote table.
#[derive(Clone)]
pub struct Table {
    locator: TableLocator,
    materializer: TableMaterializer,
    executor: MutationExecutor,
    page_size: Option<u32>,
}

impl Table {
    pub fn locator(&self) -> &TableLocator {
        &self.locator
    }

    fn params(&self) -> ListParams {
        ListParams::all_fields().with_page_size(self.page_size)
    }

    /// Materialize every record of the view.
    pub async fn all_rows(&self) -> Result<MaterializedTable> {
        self.materializer.materialize(&self.locator, &self.params()).await
    }

    pub async fn cell(&self, row: usize, field: &str) -> Result<Fetched<Cell>> {
        let params = self.params().with_field(field);
        let table = self.materializer.materialize(&self.locator, &params).await?;
        Ok(Fetched {
            status: table.status,
            value: projection::cell(&table, RowNumber(row), field)?,
        })
    }

    /// `max_rows` bounds how many records the remote returns, not how many
    /// are projected from them.
    pub async fn column(&self, field: &str, max_rows: Option<u32>) -> Result<Fetched<Column>> {
        let params = self.params().with_field(field).with_max_records(max_rows);
        let table = self.materializer.materialize(&self.locator, &params).await?;
        Ok(Fetched {
            status: table.status,
            value: projection::column(&table, field)?,
        })
    }

    pub async fn row(&self, row: usize) -> Result<Fetched<Vec<String>>> {
        let table = self.all_rows().await?;
        Ok(Fetched {
            status: table.status,
            value: projection::row_values(&table, RowNumber(row))?,
        })
    }

    /// PATCH one field of the record currently at `row`.
    pub async fn set_cell(&self, row: usize, field: &str, value: &str) -> Result<MutationOutcome> {
        let record_id = self.resolve(row).await?;
        let request = MutationRequest::update_cell(record_id, field, value);
        self.executor.execute(&self.locator, &request).await
    }

    pub async fn create_row(&self, names: &[String], values: &[String]) -> Result<MutationOutcome> {
        let request = MutationRequest::create(zip_fields(names, values)?);
        self.executor.execute(&self.locator, &request).await
    }

    /// PUT the given fields as the full contents of the record at `row`.
    pub async fn update_row(
        &self,
        row: usize,
        names: &[String],
        values: &[String],
    ) -> Result<MutationOutcome> {
        let fields = zip_fields(names, values)?;
        let record_id = self.resolve(row).await?;
        let request = MutationRequest::update(record_id, fields);
        self.executor.execute(&self.locator, &request).await
    }

    pub async fn delete_row(&self, row: usize) -> Result<MutationOutcome> {
        let record_id = self.resolve(row).await?;
        self.executor
            .execute(&self.locator, &MutationRequest::delete(record_id))
            .await
    }

    async fn resolve(&self, row: usize) -> Result<String> {
        let table = self.all_rows().await?;
        resolve_record_id(&table, RowNumber(row))
    }
}

/// Builder for configuring [`AirtableClient`] instances.
pub struct AirtableClientBuilder {
    base_url: String,
    timeouts: LinkTimeouts,
    max_pages: Option<u32>,
    page_size: Option<u32>,
    typecast: bool,
    transport: Option<SharedTransport>,
}

impl AirtableClientBuilder {
    fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: LinkTimeouts::default(),
            max_pages: None,
            page_size: None,
            typecast: true,
            transport: None,
        }
    }

    /// Override the API root (default `https://api.airtable.com/v0/`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Timeouts for the built-in reqwest transport. Ignored when a custom
    /// transport is supplied.
    pub fn timeouts(mut self, timeouts: LinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Stop following cursors after this many pages. `None` = unbounded.
    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Ask the remote to coerce string values to the field types (default true).
    pub fn typecast(mut self, typecast: bool) -> Self {
        self.typecast = typecast;
        self
    }

    pub fn transport(mut self, transport: SharedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<AirtableClient> {
        let endpoint = Endpoint::parse(&self.base_url)?;

        if let Some(page_size) = self.page_size {
            if page_size == 0 || page_size > MAX_PAGE_SIZE {
                return Err(AirtableLinkError::ConfigurationError(format!(
                    "page_size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, page_size
                )));
            }
        }
        if self.max_pages == Some(0) {
            return Err(AirtableLinkError::ConfigurationError(
                "max_pages must be at least 1".into(),
            ));
        }

        let transport: SharedTransport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.timeouts)?),
        };

        Ok(AirtableClient {
            endpoint,
            transport,
            max_pages: self.max_pages,
            page_size: self.page_size,
            typecast: self.typecast,
        })
    }
}
