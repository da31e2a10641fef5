//! Generic outbound forwarder.
//!
//! # Responsibilities
//! - Build the outbound request: method, URL, conditional query pairs,
//!   JSON or multipart body, credential header
//! - Dispatch exactly once through the shared HTTP client
//! - Decode success bodies, map failures onto the error taxonomy
//! - Record per-upstream metrics
//!
//! # Design Decisions
//! - A single attempt per inbound request; failures surface immediately
//! - Success bodies are relayed verbatim (non-JSON bodies become strings)
//! - Connection pooling is the client's concern, not the forwarder's

use std::time::Instant;

use reqwest::Method;
use serde_json::Value;

use crate::config::TimeoutConfig;
use crate::gateway::error::GatewayError;
use crate::gateway::upstream::{Upstream, X_API_KEY};
use crate::observability::metrics;

/// Body of an outbound request.
pub enum OutboundBody {
    Empty,
    Json(Value),
    Multipart(reqwest::multipart::Form),
}

/// A fully described outbound request, created per inbound request.
pub struct OutboundRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: OutboundBody,
}

impl OutboundRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: OutboundBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query pair. Optional parameters are appended conditionally
    /// by the caller; absent ones never reach the upstream.
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = OutboundBody::Json(body);
        self
    }

    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = OutboundBody::Multipart(form);
        self
    }
}

/// The shared forwarder every route dispatches through.
#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
}

impl Gateway {
    /// Build the forwarder with its HTTP client configured from timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(timeouts.connect_secs))
            .timeout(std::time::Duration::from_secs(timeouts.request_secs))
            .pool_idle_timeout(std::time::Duration::from_secs(timeouts.idle_secs))
            .build()
            .expect("failed to construct outbound HTTP client");
        Self { client }
    }

    /// Wrap an existing client. Test seam for substituting configurations.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Send a single outbound request to an upstream and map the result.
    ///
    /// On 2xx the decoded body is returned verbatim; an empty body decodes
    /// to JSON null and a non-JSON body is relayed as a string. On status
    /// >= 400 the status and best-effort decoded body are surfaced as
    /// [`GatewayError::Upstream`]. Network failures surface as
    /// [`GatewayError::Transport`].
    pub async fn send(
        &self,
        upstream: &Upstream,
        request: OutboundRequest,
    ) -> Result<Value, GatewayError> {
        let url = upstream.endpoint(&request.path);
        let method = request.method.as_str().to_string();
        let started = Instant::now();

        tracing::debug!(
            upstream = upstream.name(),
            method = %method,
            url = %url,
            "Forwarding request"
        );

        let mut builder = self
            .client
            .request(request.method, &url)
            .header(X_API_KEY, upstream.api_key());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            OutboundBody::Empty => builder,
            OutboundBody::Json(body) => builder.json(&body),
            OutboundBody::Multipart(form) => builder.multipart(form),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                metrics::record_transport_failure(upstream.name(), &method);
                tracing::error!(
                    upstream = upstream.name(),
                    method = %method,
                    url = %url,
                    error = %source,
                    "Upstream request failed"
                );
                return Err(GatewayError::Transport {
                    message: "Upstream request failed".to_string(),
                    source,
                });
            }
        };

        let status = response.status();
        metrics::record_upstream_request(upstream.name(), &method, status.as_u16(), started);

        let text = match response.text().await {
            Ok(text) => text,
            Err(source) => {
                tracing::error!(
                    upstream = upstream.name(),
                    method = %method,
                    error = %source,
                    "Failed to read upstream response body"
                );
                return Err(GatewayError::Transport {
                    message: "Upstream request failed".to_string(),
                    source,
                });
            }
        };

        if status.is_success() {
            Ok(decode_body(&text))
        } else {
            tracing::warn!(
                upstream = upstream.name(),
                method = %method,
                status = status.as_u16(),
                "Upstream returned error status"
            );
            Err(GatewayError::Upstream {
                status: status.as_u16(),
                message: "Upstream error".to_string(),
                detail: error_detail(&text),
            })
        }
    }
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn error_detail(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
