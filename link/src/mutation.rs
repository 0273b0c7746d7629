//! Mutation Executor: exactly one remote write per request.

use std::time::Instant;

use log::{debug, warn};

use crate::{
    auth::AuthProvider,
    endpoint::Endpoint,
    error::{AirtableLinkError, Result},
    models::{
        remote_error_message, MutationOutcome, MutationRequest, MutationVerb, TableLocator,
        WriteBody,
    },
    transport::{SharedTransport, TransportRequest},
};

/// Issues create/update/delete calls addressed by record identity.
///
/// Row-number resolution happens before this point; the executor only sees
/// record ids. There is no retry and nothing to roll back.
#[derive(Clone)]
pub struct MutationExecutor {
    endpoint: Endpoint,
    transport: SharedTransport,
    typecast: bool,
}

impl MutationExecutor {
    pub fn new(endpoint: Endpoint, transport: SharedTransport, typecast: bool) -> Self {
        Self {
            endpoint,
            transport,
            typecast,
        }
    }

    pub async fn execute(
        &self,
        locator: &TableLocator,
        request: &MutationRequest,
    ) -> Result<MutationOutcome> {
        let url = match (&request.target, request.verb.needs_target()) {
            (_, false) => self.endpoint.table_url(locator)?,
            (Some(target), true) => self.endpoint.record_url(locator, target)?,
            (None, true) => {
                return Err(AirtableLinkError::ConfigurationError(format!(
                    "{:?} requires a target record id",
                    request.verb
                )))
            },
        };

        let body = match request.verb {
            MutationVerb::Delete => None,
            _ => Some(serde_json::to_string(&WriteBody {
                fields: &request.fields,
                typecast: self.typecast,
            })?),
        };

        let method = request.verb.method();
        let start = Instant::now();
        let response = self
            .transport
            .send(TransportRequest {
                method: method.clone(),
                url,
                auth: AuthProvider::api_key(locator.api_key.clone()),
                body,
            })
            .await?;

        if !response.is_success() {
            let message = remote_error_message(response.status, &response.body);
            warn!(
                "[AIRTABLE_WRITE] {} failed: table='{}' target={:?} status={} message=\"{}\"",
                method, locator.table_name, request.target, response.status, message
            );
            return Err(AirtableLinkError::remote(response.status, message));
        }

        // The write already happened; an odd body must not turn it into a failure.
        let record_id = serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|body| body.get("id").and_then(|id| id.as_str()).map(str::to_string))
            .or_else(|| request.target.clone());

        debug!(
            "[AIRTABLE_WRITE] {} ok: table='{}' record={:?} status={} duration_ms={}",
            method,
            locator.table_name,
            record_id,
            response.status,
            start.elapsed().as_millis()
        );

        Ok(MutationOutcome {
            status: response.status,
            record_id,
        })
    }
}
