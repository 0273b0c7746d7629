//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::{
    error::{AirtableLinkError, Result},
    models::TableLocator,
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push(&self, response: Result<TransportResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_json(&self, status: u16, body: JsonValue) {
        self.push(Ok(TransportResponse::new(status, body.to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AirtableLinkError::TransportError("script exhausted".into())))
    }
}

pub(crate) fn locator() -> TableLocator {
    TableLocator::new("keyTest", "appTest", "Table 1", "Grid view")
}

/// List-response body with records `rec{n}` for each n in `ids`.
pub(crate) fn page_body(ids: &[u32], cursor: Option<&str>) -> JsonValue {
    let records: Vec<JsonValue> = ids
        .iter()
        .map(|n| {
            json!({
                "id": format!("rec{}", n),
                "createdTime": format!("2024-01-{:02}T00:00:00.000Z", n % 28 + 1),
                "fields": {"Name": format!("name-{}", n), "Score": n}
            })
        })
        .collect();
    match cursor {
        Some(cursor) => json!({"records": records, "offset": cursor}),
        None => json!({"records": records}),
    }
}
