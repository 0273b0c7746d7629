//! Page Fetcher: one list request, one page.

use std::time::Instant;

use log::{debug, warn};
use reqwest::Method;

use crate::{
    auth::AuthProvider,
    endpoint::Endpoint,
    error::{AirtableLinkError, Result},
    models::{remote_error_message, ListParams, Page, TableLocator},
    transport::{SharedTransport, TransportRequest},
};

/// Issues a single paginated list request.
///
/// No retries: a failed page is reported to the caller as-is.
#[derive(Clone)]
pub struct PageFetcher {
    endpoint: Endpoint,
    transport: SharedTransport,
}

impl PageFetcher {
    pub fn new(endpoint: Endpoint, transport: SharedTransport) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub async fn fetch_page(
        &self,
        locator: &TableLocator,
        params: &ListParams,
        cursor: Option<&str>,
    ) -> Result<Page> {
        let url = self.endpoint.list_url(locator, params, cursor)?;
        let request = TransportRequest {
            method: Method::GET,
            url,
            auth: AuthProvider::api_key(locator.api_key.clone()),
            body: None,
        };

        let start = Instant::now();
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = remote_error_message(response.status, &response.body);
            warn!(
                "[AIRTABLE_FETCH] List failed: table='{}' status={} message=\"{}\"",
                locator.table_name, response.status, message
            );
            return Err(AirtableLinkError::remote(response.status, message));
        }

        let mut page: Page = serde_json::from_str(&response.body)?;
        page.status = response.status;
        debug!(
            "[AIRTABLE_FETCH] Page received: table='{}' records={} more={} duration_ms={}",
            locator.table_name,
            page.records.len(),
            page.cursor.is_some(),
            start.elapsed().as_millis()
        );
        Ok(page)
    }
}
