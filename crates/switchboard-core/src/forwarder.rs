use serde_json::Value;
use std::time::Duration;

use crate::error::{Result, SwitchboardError};
use crate::registry::RouteMethod;

// ---------------------------------------------------------------------------
// ForwardReply
// ---------------------------------------------------------------------------

/// What a downstream service answered: its status code and parsed JSON body.
///
/// A non-2xx status is a valid reply, not an error — it is relayed to the
/// original caller untouched. Only transport failure (connection, timeout,
/// unparsable body) is an `Err` at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardReply {
    pub status: u16,
    pub data: Value,
}

// ---------------------------------------------------------------------------
// Forwarder
// ---------------------------------------------------------------------------

/// Issues the outbound HTTP call for a dispatched action.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Build a forwarder whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("client build");
        Self { client }
    }

    /// Send `body` (if any) as JSON to `url` and return the downstream
    /// status and parsed body verbatim.
    pub async fn forward(
        &self,
        url: &str,
        method: RouteMethod,
        body: Option<&Value>,
    ) -> Result<ForwardReply> {
        tracing::info!("forwarding {method} {url}");

        let mut request = match method {
            RouteMethod::Get => self.client.get(url),
            RouteMethod::Post => self.client.post(url),
            RouteMethod::Put => self.client.put(url),
            RouteMethod::Delete => self.client.delete(url),
        };
        if let Some(payload) = body {
            // .json() sets Content-Type: application/json.
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SwitchboardError::Forwarding(e.to_string()))?;

        let status = response.status().as_u16();
        let data: Value = response
            .json()
            .await
            .map_err(|e| SwitchboardError::Forwarding(format!("invalid JSON from downstream: {e}")))?;

        tracing::info!("downstream {method} {url} responded {status}");
        Ok(ForwardReply { status, data })
    }
}
