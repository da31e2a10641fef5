//! Agent runtime routes: creation, lookup, reload, launch finalization,
//! and token-fee estimation.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::fields::{normalize_address, path_segment, relative_endpoint, require_field};
use crate::gateway::{GatewayError, OutboundRequest};
use crate::http::server::AppState;

/// Create an agent from a multipart form.
///
/// Fields: `name` (required), `ticker` (required), `description`, `image`.
/// The form is rebuilt field by field and forwarded as multipart; unknown
/// fields are dropped.
pub async fn create_agent(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, GatewayError> {
    let mut form = reqwest::multipart::Form::new();
    let mut name = None;
    let mut ticker = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::validation(format!("Invalid multipart payload: {e}")))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field_name.as_str() {
            "name" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| GatewayError::validation(format!("Invalid multipart payload: {e}")))?;
                name = Some(value.clone());
                form = form.text("name", value);
            }
            "ticker" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| GatewayError::validation(format!("Invalid multipart payload: {e}")))?;
                ticker = Some(value.clone());
                form = form.text("ticker", value);
            }
            "description" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| GatewayError::validation(format!("Invalid multipart payload: {e}")))?;
                form = form.text("description", value);
            }
            "image" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "image".to_string());
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    GatewayError::validation(format!("Invalid multipart payload: {e}"))
                })?;

                let mut part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(file_name);
                if let Some(content_type) = content_type {
                    part = part.mime_str(&content_type).map_err(|e| {
                        GatewayError::validation(format!("Invalid image content type: {e}"))
                    })?;
                }
                form = form.part("image", part);
            }
            other => {
                tracing::debug!(field = other, "Dropping unknown multipart field");
            }
        }
    }

    require_field(name.as_deref(), "Agent name")?;
    require_field(ticker.as_deref(), "Agent ticker")?;

    let response = state
        .gateway
        .send(&state.agent_api, OutboundRequest::post("/agents").multipart(form))
        .await
        .map_err(|e| e.with_message("Failed to create agent"))?;

    Ok(Json(response))
}

pub async fn get_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = path_segment(&agent_id, "Agent id")?;

    let response = state
        .gateway
        .send(&state.agent_api, OutboundRequest::get(format!("/agents/{agent_id}")))
        .await
        .map_err(|e| e.with_message("Failed to fetch agent"))?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ReloadAgentRequest {
    pub endpoint: Option<String>,
}

/// Reload an agent by hitting a caller-supplied runtime endpoint.
///
/// The endpoint is a path fragment joined to the configured agent-API base;
/// absolute URLs and traversal are rejected so the call cannot leave the
/// configured upstream.
pub async fn reload_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    Json(body): Json<ReloadAgentRequest>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = path_segment(&agent_id, "Agent id")?;
    let endpoint = relative_endpoint(body.endpoint.as_deref(), "Endpoint")?;

    tracing::info!(agent_id = %agent_id, endpoint = %endpoint, "Reloading agent");

    let response = state
        .gateway
        .send(&state.agent_api, OutboundRequest::post(endpoint))
        .await
        .map_err(|e| e.with_message("Failed to reload agent"))?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeAgentRequest {
    pub tx_hash: Option<String>,
}

/// Finalize an agent launch after its on-chain transaction confirms.
///
/// The upstream payload is relayed under the `finalizeResponse` key the UI
/// consumes.
pub async fn finalize_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    Json(body): Json<FinalizeAgentRequest>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = path_segment(&agent_id, "Agent id")?;
    let tx_hash = require_field(body.tx_hash.as_deref(), "Transaction hash")?;

    let response = state
        .gateway
        .send(
            &state.agent_api,
            OutboundRequest::post(format!("/agents/{agent_id}/finalize"))
                .json(json!({ "txHash": tx_hash })),
        )
        .await
        .map_err(|e| e.with_message("Failed to finalize agent launch"))?;

    Ok(Json(json!({ "finalizeResponse": response })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeesQuery {
    pub pool_address: Option<String>,
}

pub async fn estimate_fees(
    State(state): State<AppState>,
    Query(query): Query<FeesQuery>,
) -> Result<Json<Value>, GatewayError> {
    let pool_address = normalize_address(query.pool_address.as_deref(), "Pool address")?;

    let response = state
        .gateway
        .send(
            &state.agent_api,
            OutboundRequest::get("/fees/estimate").query("poolAddress", pool_address),
        )
        .await
        .map_err(|e| e.with_message("Failed to estimate fees"))?;

    Ok(Json(response))
}
