//! In-memory Airtable stand-in shared by the integration suites.
//!
//! `FakeAirtable` implements [`Transport`] over a fixture table: it serves
//! paginated list requests with its own cursors, applies POST/PUT/PATCH/DELETE
//! to its state, records every request and can inject faults on chosen calls.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use airtable_link::{
    AirtableClient, AirtableLinkError, Result, TableLocator, Transport, TransportRequest,
    TransportResponse,
};
use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Method;
use serde_json::{json, Value as JsonValue};

pub const FAKE_BASE_URL: &str = "https://fake.airtable.test/v0/";
pub const FAKE_API_KEY: &str = "keyFake";
pub const FAKE_BASE_ID: &str = "appFake";
pub const FAKE_TABLE: &str = "Table 1";
pub const FAKE_VIEW: &str = "Grid view";

static LOGGER: OnceLock<()> = OnceLock::new();

pub fn init_logger() {
    LOGGER.get_or_init(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[derive(Debug, Clone)]
pub struct FakeRecord {
    pub id: String,
    pub created_time: String,
    pub fields: IndexMap<String, JsonValue>,
}

#[derive(Debug, Clone)]
enum Fault {
    Status(u16, String),
    Transport(String),
}

struct State {
    records: Vec<FakeRecord>,
    next_id: u32,
    page_size: usize,
    latency: Option<Duration>,
    calls: usize,
    faults: HashMap<usize, Fault>,
    requests: Vec<TransportRequest>,
}

pub struct FakeAirtable {
    state: Mutex<State>,
}

impl FakeAirtable {
    /// `rows` fixture records (`Name = "row-{i}"`, `Score = i`), served
    /// `page_size` per page.
    pub fn with_rows(rows: usize, page_size: usize) -> Arc<Self> {
        let records = (1..=rows)
            .map(|i| FakeRecord {
                id: format!("rec{:03}", i),
                created_time: format!("2024-02-{:02}T10:00:00.000Z", (i % 28) + 1),
                fields: IndexMap::from([
                    ("Name".to_string(), json!(format!("row-{}", i))),
                    ("Score".to_string(), json!(i)),
                ]),
            })
            .collect();
        Self::with_records(records, page_size)
    }

    pub fn with_records(records: Vec<FakeRecord>, page_size: usize) -> Arc<Self> {
        let next_id = records.len() as u32 + 1;
        Arc::new(Self {
            state: Mutex::new(State {
                records,
                next_id,
                page_size: page_size.max(1),
                latency: None,
                calls: 0,
                faults: HashMap::new(),
                requests: Vec::new(),
            }),
        })
    }

    /// Delay every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().unwrap().latency = Some(latency);
    }

    /// Answer the `call`-th request (1-based) with `status` and `body`.
    pub fn fail_call_with_status(&self, call: usize, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .faults
            .insert(call, Fault::Status(status, body.to_string()));
    }

    /// Fail the `call`-th request (1-based) before any response.
    pub fn fail_call_with_transport(&self, call: usize) {
        self.state
            .lock()
            .unwrap()
            .faults
            .insert(call, Fault::Transport("connection reset by peer".into()));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn writes(&self) -> Vec<TransportRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }

    pub fn record_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn field(&self, record_id: &str, name: &str) -> Option<JsonValue> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|r| r.id == record_id)
            .and_then(|r| r.fields.get(name).cloned())
    }

    pub fn fields_of(&self, record_id: &str) -> Option<IndexMap<String, JsonValue>> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|r| r.id == record_id)
            .map(|r| r.fields.clone())
    }

    /// Insert a record at `index` behind the client's back.
    pub fn insert_at(&self, index: usize, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = format!("recX{:03}", state.next_id);
        state.next_id += 1;
        state.records.insert(
            index,
            FakeRecord {
                id: id.clone(),
                created_time: "2024-03-01T00:00:00.000Z".into(),
                fields: IndexMap::from([("Name".to_string(), json!(name))]),
            },
        );
        id
    }

    fn handle(&self, request: &TransportRequest) -> Result<TransportResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let call = state.calls;
        state.requests.push(request.clone());

        match state.faults.remove(&call) {
            Some(Fault::Status(status, body)) => return Ok(TransportResponse::new(status, body)),
            Some(Fault::Transport(message)) => {
                return Err(AirtableLinkError::TransportError(message))
            },
            None => {},
        }

        if request.auth.bearer_token() != Some(FAKE_API_KEY) {
            return Ok(error_response(
                401,
                json!({"error": {"type": "AUTHENTICATION_REQUIRED", "message": "Authentication required"}}),
            ));
        }

        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|s| s.map(str::to_string).collect())
            .unwrap_or_default();
        if segments.len() < 3 || segments[1] != FAKE_BASE_ID || segments[2] != "Table%201" {
            return Ok(error_response(404, json!({"error": "NOT_FOUND"})));
        }
        let target = segments.get(3).cloned();

        match (request.method.clone(), target) {
            (Method::GET, None) => Ok(state.list(request)),
            (Method::POST, None) => state.create(request),
            (Method::PATCH, Some(id)) => state.update(&id, request, false),
            (Method::PUT, Some(id)) => state.update(&id, request, true),
            (Method::DELETE, Some(id)) => Ok(state.delete(&id)),
            _ => Ok(error_response(404, json!({"error": "NOT_FOUND"}))),
        }
    }
}

impl State {
    fn list(&self, request: &TransportRequest) -> TransportResponse {
        let mut fields: Vec<String> = Vec::new();
        let mut max_records: Option<usize> = None;
        let mut page_size = self.page_size;
        let mut start = 0usize;
        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "fields[]" => fields.push(value.into_owned()),
                "maxRecords" => max_records = value.parse().ok(),
                "pageSize" => page_size = value.parse().unwrap_or(page_size),
                "offset" => match value.strip_prefix("itr").and_then(|v| v.parse().ok()) {
                    Some(index) => start = index,
                    None => {
                        return error_response(
                            422,
                            json!({"error": {"type": "LIST_RECORDS_ITERATOR_NOT_AVAILABLE"}}),
                        )
                    },
                },
                _ => {},
            }
        }

        let total = max_records.map_or(self.records.len(), |m| m.min(self.records.len()));
        let end = (start + page_size).min(total);
        let records: Vec<JsonValue> = self.records[start.min(end)..end]
            .iter()
            .map(|record| {
                let visible: serde_json::Map<String, JsonValue> = record
                    .fields
                    .iter()
                    .filter(|(name, _)| fields.is_empty() || fields.contains(name))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect();
                json!({"id": record.id, "createdTime": record.created_time, "fields": visible})
            })
            .collect();

        let mut body = json!({ "records": records });
        if end < total {
            body["offset"] = json!(format!("itr{}", end));
        }
        TransportResponse::new(200, body.to_string())
    }

    fn create(&mut self, request: &TransportRequest) -> Result<TransportResponse> {
        let fields = body_fields(request)?;
        let record = FakeRecord {
            id: format!("recN{:03}", self.next_id),
            created_time: "2024-04-01T00:00:00.000Z".into(),
            fields,
        };
        self.next_id += 1;
        let response = record_json(&record);
        self.records.push(record);
        Ok(TransportResponse::new(200, response.to_string()))
    }

    fn update(
        &mut self,
        id: &str,
        request: &TransportRequest,
        replace: bool,
    ) -> Result<TransportResponse> {
        let fields = body_fields(request)?;
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(error_response(404, json!({"error": "NOT_FOUND"})));
        };
        if replace {
            record.fields = fields;
        } else {
            record.fields.extend(fields);
        }
        Ok(TransportResponse::new(200, record_json(record).to_string()))
    }

    fn delete(&mut self, id: &str) -> TransportResponse {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                self.records.remove(index);
                TransportResponse::new(200, json!({"id": id, "deleted": true}).to_string())
            },
            None => error_response(404, json!({"error": "NOT_FOUND"})),
        }
    }
}

fn body_fields(request: &TransportRequest) -> Result<IndexMap<String, JsonValue>> {
    let body: JsonValue = serde_json::from_str(request.body.as_deref().unwrap_or("{}"))?;
    let fields = body
        .get("fields")
        .and_then(JsonValue::as_object)
        .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();
    Ok(fields)
}

fn record_json(record: &FakeRecord) -> JsonValue {
    json!({"id": record.id, "createdTime": record.created_time, "fields": record.fields})
}

fn error_response(status: u16, body: JsonValue) -> TransportResponse {
    TransportResponse::new(status, body.to_string())
}

#[async_trait]
impl Transport for FakeAirtable {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let latency = self.state.lock().unwrap().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.handle(&request)
    }
}

pub fn locator() -> TableLocator {
    TableLocator::new(FAKE_API_KEY, FAKE_BASE_ID, FAKE_TABLE, FAKE_VIEW)
}

pub fn client(fake: &Arc<FakeAirtable>) -> AirtableClient {
    init_logger();
    AirtableClient::builder()
        .base_url(FAKE_BASE_URL)
        .transport(fake.clone())
        .build()
        .unwrap()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
