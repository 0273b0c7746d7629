//! Table Materializer: drains every page of a table into one snapshot.

use std::time::Instant;

use log::{debug, warn};

use crate::{
    error::{AirtableLinkError, Result},
    fetcher::PageFetcher,
    models::{ListParams, MaterializedTable, TableLocator},
};

/// Follows cursors until the remote stops issuing them.
///
/// Records keep the remote order (page by page, then within each page);
/// duplicates are passed through. A failed page discards everything
/// gathered so far.
#[derive(Clone)]
pub struct TableMaterializer {
    fetcher: PageFetcher,
    max_pages: Option<u32>,
}

impl TableMaterializer {
    /// `max_pages` of `None` follows cursors without limit.
    pub fn new(fetcher: PageFetcher, max_pages: Option<u32>) -> Self {
        Self { fetcher, max_pages }
    }

    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    pub async fn materialize(
        &self,
        locator: &TableLocator,
        params: &ListParams,
    ) -> Result<MaterializedTable> {
        let start = Instant::now();
        let mut table = MaterializedTable::default();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .fetcher
                .fetch_page(locator, params, cursor.as_deref())
                .await?;

            table.pages += 1;
            table.status = page.status;
            table.records.extend(page.records);

            let Some(next) = page.cursor else {
                break;
            };
            if let Some(limit) = self.max_pages {
                if table.pages >= limit {
                    warn!(
                        "[AIRTABLE_FETCH] Remote still has pages after {} requests; giving up",
                        limit
                    );
                    return Err(AirtableLinkError::PageLimitExceeded { limit });
                }
            }
            cursor = Some(next);
        }

        debug!(
            "[AIRTABLE_FETCH] Materialized table='{}' records={} pages={} total_ms={}",
            locator.table_name,
            table.records.len(),
            table.pages,
            start.elapsed().as_millis()
        );
        Ok(table)
    }
}
