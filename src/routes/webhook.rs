//! Telegram webhook receiver.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::{json, Value};

use crate::gateway::OutboundRequest;
use crate::http::server::AppState;

/// Header Telegram sets when the webhook was registered with a secret.
pub const TELEGRAM_SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Receive a Telegram update and relay it to the mirror service.
///
/// Always answers 200 `{"ok":true}`: Telegram retries aggressively on any
/// other status, and a retry storm is worse than a dropped update. Secret
/// mismatches and malformed bodies are logged and dropped, not reported.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    if let Some(expected) = &state.config.upstreams.telegram_webhook_secret {
        let provided = headers
            .get(TELEGRAM_SECRET_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            tracing::warn!("Telegram webhook secret mismatch, dropping update");
            return Json(json!({ "ok": true }));
        }
    }

    let update: Value = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed Telegram update, dropping");
            return Json(json!({ "ok": true }));
        }
    };

    if let Err(e) = state
        .gateway
        .send(
            &state.mirror_api,
            OutboundRequest::post("/telegram/webhook").json(update),
        )
        .await
    {
        tracing::error!(error = %e, "Failed to relay Telegram update");
    }

    Json(json!({ "ok": true }))
}
