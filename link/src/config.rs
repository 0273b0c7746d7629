use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::{
    client::AirtableClientBuilder,
    endpoint::DEFAULT_BASE_URL,
    error::{AirtableLinkError, Result},
    models::TableLocator,
    timeouts::LinkTimeouts,
};

pub const DEFAULT_TABLE_NAME: &str = "Table 1";
pub const DEFAULT_VIEW_NAME: &str = "Grid view";

/// Locator plus client options, loadable from a key/value map, the
/// environment, or any serde source.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LinkConfig {
    #[serde(alias = "apiKey")]
    pub api_key: String,
    #[serde(alias = "baseId")]
    pub base_id: String,
    #[serde(alias = "tableName", default = "default_table_name")]
    pub table_name: String,
    #[serde(alias = "viewName", default = "default_view_name")]
    pub view_name: String,
    #[serde(alias = "baseUrl", default)]
    pub base_url: Option<String>,
    #[serde(alias = "maxPages", default)]
    pub max_pages: Option<u32>,
    #[serde(alias = "pageSize", default)]
    pub page_size: Option<u32>,
    #[serde(default = "default_typecast")]
    pub typecast: bool,
    /// Milliseconds; 0 disables.
    #[serde(alias = "requestTimeoutMs", default)]
    pub request_timeout_ms: u64,
    /// Milliseconds; 0 disables.
    #[serde(alias = "connectionTimeoutMs", default)]
    pub connection_timeout_ms: u64,
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_view_name() -> String {
    DEFAULT_VIEW_NAME.to_string()
}

fn default_typecast() -> bool {
    true
}

impl fmt::Debug for LinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkConfig")
            .field("api_key", &"***")
            .field("base_id", &self.base_id)
            .field("table_name", &self.table_name)
            .field("view_name", &self.view_name)
            .field("base_url", &self.base_url)
            .field("max_pages", &self.max_pages)
            .field("page_size", &self.page_size)
            .field("typecast", &self.typecast)
            .finish()
    }
}

impl LinkConfig {
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            table_name: default_table_name(),
            view_name: default_view_name(),
            base_url: None,
            max_pages: None,
            page_size: None,
            typecast: true,
            request_timeout_ms: 0,
            connection_timeout_ms: 0,
        }
    }

    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let api_key = get_str(map, "api_key", "apiKey")
            .ok_or_else(|| AirtableLinkError::ConfigurationError("api_key is required".into()))?;
        let base_id = get_str(map, "base_id", "baseId")
            .ok_or_else(|| AirtableLinkError::ConfigurationError("base_id is required".into()))?;

        let mut config = Self::new(api_key, base_id);

        if let Some(value) = get_str(map, "table_name", "tableName") {
            config.table_name = value;
        }
        if let Some(value) = get_str(map, "view_name", "viewName") {
            config.view_name = value;
        }
        config.base_url = get_str(map, "base_url", "baseUrl");
        if let Some(value) = get_str(map, "max_pages", "maxPages") {
            config.max_pages = Some(parse_u32(&value, "max_pages")?);
        }
        if let Some(value) = get_str(map, "page_size", "pageSize") {
            config.page_size = Some(parse_u32(&value, "page_size")?);
        }
        if let Some(value) = get_str(map, "typecast", "typecast") {
            config.typecast = parse_bool(&value)?;
        }
        if let Some(value) = get_str(map, "request_timeout_ms", "requestTimeoutMs") {
            config.request_timeout_ms = parse_u64(&value, "request_timeout_ms")?;
        }
        if let Some(value) = get_str(map, "connection_timeout_ms", "connectionTimeoutMs") {
            config.connection_timeout_ms = parse_u64(&value, "connection_timeout_ms")?;
        }

        Ok(config)
    }

    /// Read `AIRTABLE_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        let pairs = [
            ("AIRTABLE_API_KEY", "api_key"),
            ("AIRTABLE_BASE_ID", "base_id"),
            ("AIRTABLE_TABLE_NAME", "table_name"),
            ("AIRTABLE_VIEW_NAME", "view_name"),
            ("AIRTABLE_BASE_URL", "base_url"),
            ("AIRTABLE_MAX_PAGES", "max_pages"),
            ("AIRTABLE_PAGE_SIZE", "page_size"),
        ];
        let map: HashMap<String, String> = pairs
            .iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|v| (key.to_string(), v)))
            .collect();
        Self::from_map(&map)
    }

    pub fn locator(&self) -> TableLocator {
        TableLocator::new(&self.api_key, &self.base_id, &self.table_name, &self.view_name)
    }

    pub fn timeouts(&self) -> LinkTimeouts {
        LinkTimeouts::builder()
            .request_timeout(std::time::Duration::from_millis(self.request_timeout_ms))
            .connection_timeout(std::time::Duration::from_millis(self.connection_timeout_ms))
            .build()
    }

    /// Client builder preloaded with these options; a custom transport can
    /// still be attached before `build()`.
    pub fn client_builder(&self) -> AirtableClientBuilder {
        crate::client::AirtableClient::builder()
            .base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
            .timeouts(self.timeouts())
            .max_pages(self.max_pages)
            .page_size(self.page_size)
            .typecast(self.typecast)
    }
}

fn get_str(map: &HashMap<String, String>, key: &str, alias: &str) -> Option<String> {
    map.get(key).cloned().or_else(|| map.get(alias).cloned())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(AirtableLinkError::ConfigurationError(format!(
            "Invalid boolean value: {}",
            value
        ))),
    }
}

fn parse_u32(value: &str, field: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        AirtableLinkError::ConfigurationError(format!("Invalid {} value: {}", field, value))
    })
}

fn parse_u64(value: &str, field: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        AirtableLinkError::ConfigurationError(format!("Invalid {} value: {}", field, value))
    })
}
