//! URL construction for table, record and list endpoints.
//!
//! Base id, table name and record id are pushed as path segments and list
//! parameters as query pairs, so spaces and reserved characters are
//! percent-encoded rather than pasted into the URL.

use reqwest::Url;

use crate::{
    error::{AirtableLinkError, Result},
    models::{ListParams, TableLocator},
};

pub const DEFAULT_BASE_URL: &str = "https://api.airtable.com/v0/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: Url,
}

impl Endpoint {
    pub fn parse(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AirtableLinkError::ConfigurationError(format!("Invalid base_url '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AirtableLinkError::ConfigurationError(format!(
                "base_url '{}' cannot carry path segments",
                base_url
            )));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{baseId}/{table}`
    pub fn table_url(&self, locator: &TableLocator) -> Result<Url> {
        self.with_segments(&[locator.base_id.as_str(), locator.table_name.as_str()])
    }

    /// `{base}/{baseId}/{table}/{recordId}`
    pub fn record_url(&self, locator: &TableLocator, record_id: &str) -> Result<Url> {
        self.with_segments(&[locator.base_id.as_str(), locator.table_name.as_str(), record_id])
    }

    /// `{base}/{baseId}/{table}?view=..&fields[]=..&maxRecords=..&pageSize=..&offset=..`
    pub fn list_url(
        &self,
        locator: &TableLocator,
        params: &ListParams,
        cursor: Option<&str>,
    ) -> Result<Url> {
        let mut url = self.table_url(locator)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("view", &locator.view_name);
            for field in &params.fields {
                query.append_pair("fields[]", field);
            }
            if let Some(max_records) = params.max_records {
                query.append_pair("maxRecords", &max_records.to_string());
            }
            if let Some(page_size) = params.page_size {
                query.append_pair("pageSize", &page_size.to_string());
            }
            if let Some(cursor) = cursor {
                query.append_pair("offset", cursor);
            }
        }
        Ok(url)
    }

    fn with_segments(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AirtableLinkError::ConfigurationError(format!(
                    "base_url '{}' cannot carry path segments",
                    self.base_url
                ))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}
