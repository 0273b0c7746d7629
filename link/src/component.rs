//! The caller-facing component.
//!
//! [`AirtableComponent`] owns a mutable [`TableLocator`] plus the
//! dispatcher. Each operation snapshots the locator at dispatch time, runs
//! on a worker and reports back through the [`EventStream`] returned by
//! [`AirtableComponent::new`]. Changing the configuration while an
//! operation is in flight only affects operations dispatched afterwards.

use std::future::Future;
use std::sync::RwLock;

use tokio::runtime::Handle;

use crate::{
    client::{AirtableClient, Table},
    config::{LinkConfig, DEFAULT_TABLE_NAME, DEFAULT_VIEW_NAME},
    dispatcher::{AsyncDispatcher, EventStream, InvocationHandle},
    error::Result,
    event_handlers::DispatchHooks,
    events::{OperationKind, TableEvent},
    models::TableLocator,
};

pub const DEFAULT_API_KEY: &str = "API-KEY";
pub const DEFAULT_BASE_ID: &str = "BASE-ID";

pub struct AirtableComponent {
    client: AirtableClient,
    locator: RwLock<TableLocator>,
    dispatcher: AsyncDispatcher,
}

impl AirtableComponent {
    /// Component with placeholder settings (`API-KEY`, `BASE-ID`,
    /// `Table 1`, `Grid view`). Operations fail with a remote error until
    /// real values are set.
    pub fn new(client: AirtableClient, runtime: Handle) -> (Self, EventStream) {
        let locator = TableLocator::new(
            DEFAULT_API_KEY,
            DEFAULT_BASE_ID,
            DEFAULT_TABLE_NAME,
            DEFAULT_VIEW_NAME,
        );
        Self::with_locator(client, locator, runtime)
    }

    pub fn with_locator(
        client: AirtableClient,
        locator: TableLocator,
        runtime: Handle,
    ) -> (Self, EventStream) {
        let (dispatcher, events) = AsyncDispatcher::new(runtime);
        let component = Self {
            client,
            locator: RwLock::new(locator),
            dispatcher,
        };
        (component, events)
    }

    /// Build client and component from a [`LinkConfig`].
    pub fn from_config(config: &LinkConfig, runtime: Handle) -> Result<(Self, EventStream)> {
        let client = config.client_builder().build()?;
        Ok(Self::with_locator(client, config.locator(), runtime))
    }

    pub fn with_hooks(mut self, hooks: DispatchHooks) -> Self {
        self.dispatcher = self.dispatcher.with_hooks(hooks);
        self
    }

    /// Copy of the current configuration.
    pub fn locator(&self) -> TableLocator {
        match self.locator.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update_locator(&self, apply: impl FnOnce(&mut TableLocator)) {
        match self.locator.write() {
            Ok(mut guard) => apply(&mut guard),
            Err(poisoned) => apply(&mut poisoned.into_inner()),
        }
    }

    pub fn api_key(&self) -> String {
        self.locator().api_key
    }

    pub fn set_api_key(&self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        self.update_locator(|locator| locator.api_key = api_key);
    }

    pub fn base_id(&self) -> String {
        self.locator().base_id
    }

    pub fn set_base_id(&self, base_id: impl Into<String>) {
        let base_id = base_id.into();
        self.update_locator(|locator| locator.base_id = base_id);
    }

    pub fn table_name(&self) -> String {
        self.locator().table_name
    }

    pub fn set_table_name(&self, table_name: impl Into<String>) {
        let table_name = table_name.into();
        self.update_locator(|locator| locator.table_name = table_name);
    }

    pub fn view_name(&self) -> String {
        self.locator().view_name
    }

    pub fn set_view_name(&self, view_name: impl Into<String>) {
        let view_name = view_name.into();
        self.update_locator(|locator| locator.view_name = view_name);
    }

    /// Bind the current locator and hand `op` to the dispatcher. A blank
    /// locator field fails the invocation without sending anything.
    fn run<F, Fut>(&self, kind: OperationKind, op: F) -> InvocationHandle
    where
        F: FnOnce(Table) -> Fut + Send + 'static,
        Fut: Future<Output = Result<TableEvent>> + Send + 'static,
    {
        let table = self.client.table(self.locator());
        self.dispatcher.dispatch(kind, async move { op(table?).await })
    }

    /// Delivers `GotAllRows`.
    pub fn get_all_rows(&self) -> InvocationHandle {
        self.run(OperationKind::GetAllRows, |table| async move {
            let materialized = table.all_rows().await?;
            Ok(TableEvent::GotAllRows {
                status: materialized.status,
                total_rows: materialized.len(),
                records: materialized.records,
            })
        })
    }

    /// Delivers `GotCell`.
    pub fn get_cell(&self, row: usize, column: impl Into<String>) -> InvocationHandle {
        let column = column.into();
        self.run(OperationKind::GetCell, move |table| async move {
            let fetched = table.cell(row, &column).await?;
            Ok(TableEvent::GotCell {
                status: fetched.status,
                value: fetched.value.value,
                record_id: fetched.value.record_id,
                created_time: fetched.value.created_time,
            })
        })
    }

    /// Delivers `GotColumn`. `max_rows` bounds the records requested.
    pub fn get_column(&self, column: impl Into<String>, max_rows: Option<u32>) -> InvocationHandle {
        let column = column.into();
        self.run(OperationKind::GetColumn, move |table| async move {
            let fetched = table.column(&column, max_rows).await?;
            Ok(TableEvent::GotColumn {
                status: fetched.status,
                values: fetched.value.values,
                record_ids: fetched.value.record_ids,
                created_times: fetched.value.created_times,
            })
        })
    }

    /// Delivers `GotRow`.
    pub fn get_row(&self, row: usize) -> InvocationHandle {
        self.run(OperationKind::GetRow, move |table| async move {
            let fetched = table.row(row).await?;
            Ok(TableEvent::GotRow {
                status: fetched.status,
                values: fetched.value,
            })
        })
    }

    /// Delivers `CellChanged`.
    pub fn set_cell(
        &self,
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> InvocationHandle {
        let column = column.into();
        let value = value.into();
        self.run(OperationKind::SetCell, move |table| async move {
            let outcome = table.set_cell(row, &column, &value).await?;
            Ok(TableEvent::CellChanged {
                status: outcome.status,
            })
        })
    }

    /// Delivers `RowCreated`.
    pub fn create_row(&self, names: Vec<String>, values: Vec<String>) -> InvocationHandle {
        self.run(OperationKind::CreateRow, move |table| async move {
            let outcome = table.create_row(&names, &values).await?;
            Ok(TableEvent::RowCreated {
                status: outcome.status,
            })
        })
    }

    /// Delivers `RowUpdated`.
    pub fn update_row_by_num(
        &self,
        row: usize,
        names: Vec<String>,
        values: Vec<String>,
    ) -> InvocationHandle {
        self.run(OperationKind::UpdateRowByNum, move |table| async move {
            let outcome = table.update_row(row, &names, &values).await?;
            Ok(TableEvent::RowUpdated {
                status: outcome.status,
            })
        })
    }

    /// Delivers `DeletedRowByNumber`.
    pub fn delete_row_num(&self, row: usize) -> InvocationHandle {
        self.run(OperationKind::DeleteRowNum, move |table| async move {
            let outcome = table.delete_row(row).await?;
            Ok(TableEvent::DeletedRowByNumber {
                status: outcome.status,
            })
        })
    }
}
