//! Gateway error taxonomy and wire envelope.
//!
//! Three failure classes exist: local validation rejections (never reach the
//! network), upstream error statuses (propagated), and transport failures
//! (mapped to 500). Every class serializes to the same JSON envelope:
//! `{ "error": string, "details"?: value, "status"?: number }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};
use thiserror::Error;

/// Error produced while handling a gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client input missing or malformed. Local rejection, no outbound call.
    #[error("{0}")]
    Validation(String),

    /// Upstream responded with an error status.
    #[error("{message} (upstream status {status})")]
    Upstream {
        status: u16,
        message: String,
        detail: Option<Value>,
    },

    /// Network-level failure reaching the upstream.
    #[error("{message}: {source}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    /// Build a validation error from any printable message.
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    /// Replace the user-facing message on upstream/transport errors.
    ///
    /// Validation messages are already route-specific and stay untouched.
    pub fn with_message(self, message: &str) -> Self {
        match self {
            GatewayError::Upstream { status, detail, .. } => GatewayError::Upstream {
                status,
                message: message.to_string(),
                detail,
            },
            GatewayError::Transport { source, .. } => GatewayError::Transport {
                message: message.to_string(),
                source,
            },
            other => other,
        }
    }

    /// HTTP status this error maps to.
    ///
    /// Upstream statuses are propagated when representable; anything else
    /// defaults to 500.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            GatewayError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON error envelope sent to the caller.
    pub fn envelope(&self) -> Value {
        match self {
            GatewayError::Validation(message) => json!({ "error": message }),
            GatewayError::Upstream {
                status,
                message,
                detail,
            } => {
                let mut body = json!({ "error": message, "status": status });
                if let Some(detail) = detail {
                    body["details"] = detail.clone();
                }
                body
            }
            GatewayError::Transport { message, source } => {
                json!({ "error": message, "details": source.to_string() })
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}
