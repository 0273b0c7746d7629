//! HTTP transport seam.
//!
//! Fetcher and executor speak to the remote through [`Transport`], one
//! request in, one response out. [`ReqwestTransport`] is the production
//! implementation; tests plug in an in-memory one.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, Url};

use crate::{
    auth::AuthProvider,
    error::{AirtableLinkError, Result},
    timeouts::LinkTimeouts,
};

/// A fully-built request: method, encoded URL, credentials and JSON body.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub auth: AuthProvider,
    pub body: Option<String>,
}

/// Raw response: status and body text. Non-2xx statuses are returned, not
/// raised; the caller maps them to [`AirtableLinkError::RemoteError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One blocking-style request/response exchange.
///
/// Implementations fail with [`AirtableLinkError::TransportError`] only when
/// no response was obtained. They never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

pub type SharedTransport = Arc<dyn Transport>;

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeouts: &LinkTimeouts) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(std::time::Duration::from_secs(90));

        if !LinkTimeouts::is_no_timeout(timeouts.request_timeout) {
            builder = builder.timeout(timeouts.request_timeout);
        }
        if !LinkTimeouts::is_no_timeout(timeouts.connection_timeout) {
            builder = builder.connect_timeout(timeouts.connection_timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| AirtableLinkError::ConfigurationError(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Wrap an already-configured client.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let TransportRequest {
            method,
            url,
            auth,
            body,
        } = request;

        debug!("[AIRTABLE_HTTP] Sending {} to {}", method, url);
        let start = Instant::now();

        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        builder = auth.apply_to_request(builder);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "[AIRTABLE_HTTP] {} {} failed after {:?}: {}",
                    method,
                    url,
                    start.elapsed(),
                    e
                );
                return Err(e.into());
            },
        };

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(
            "[AIRTABLE_HTTP] Response received: status={} bytes={} duration_ms={}",
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        Ok(TransportResponse { status, body })
    }
}
