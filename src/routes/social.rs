//! Social-platform connection routes, brokered by the mirror service.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::fields::require_field;
use crate::gateway::{GatewayError, OutboundRequest};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTwitterRequest {
    pub agent_id: Option<String>,
    pub username: Option<String>,
}

/// Link a Twitter account to an agent.
///
/// Twitter OAuth handshakes are the one upstream that regularly times out;
/// a 503 from the mirror keeps its meaning instead of collapsing into a
/// generic failure.
pub async fn link_twitter(
    State(state): State<AppState>,
    Json(body): Json<LinkTwitterRequest>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(body.agent_id.as_deref(), "Agent id")?;
    let username = require_field(body.username.as_deref(), "Username")?;

    let request = OutboundRequest::post("/twitter/link")
        .json(json!({ "agentId": agent_id, "username": username }));

    match state.gateway.send(&state.mirror_api, request).await {
        Ok(response) => Ok(Json(response)),
        Err(GatewayError::Upstream { status: 503, detail, .. }) => Err(GatewayError::Upstream {
            status: 503,
            message: "Twitter service unavailable or timed out".to_string(),
            detail,
        }),
        Err(e) => Err(e.with_message("Failed to link Twitter account")),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionQuery {
    pub agent_id: Option<String>,
}

pub async fn twitter_status(
    State(state): State<AppState>,
    Query(query): Query<ConnectionQuery>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(query.agent_id.as_deref(), "Agent id")?;

    let response = state
        .gateway
        .send(
            &state.mirror_api,
            OutboundRequest::get("/twitter/status").query("agentId", agent_id),
        )
        .await
        .map_err(|e| e.with_message("Failed to fetch Twitter connection status"))?;

    Ok(Json(response))
}

pub async fn unlink_twitter(
    State(state): State<AppState>,
    Query(query): Query<ConnectionQuery>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(query.agent_id.as_deref(), "Agent id")?;

    let response = state
        .gateway
        .send(
            &state.mirror_api,
            OutboundRequest::delete("/twitter/link").query("agentId", agent_id),
        )
        .await
        .map_err(|e| e.with_message("Failed to unlink Twitter account"))?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFarcasterRequest {
    pub agent_id: Option<String>,
    pub fid: Option<i64>,
}

pub async fn link_farcaster(
    State(state): State<AppState>,
    Json(body): Json<LinkFarcasterRequest>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(body.agent_id.as_deref(), "Agent id")?;
    let fid = body
        .fid
        .ok_or_else(|| GatewayError::validation("Farcaster id is required"))?;

    let response = state
        .gateway
        .send(
            &state.mirror_api,
            OutboundRequest::post("/farcaster/link").json(json!({ "agentId": agent_id, "fid": fid })),
        )
        .await
        .map_err(|e| e.with_message("Failed to link Farcaster account"))?;

    Ok(Json(response))
}

pub async fn farcaster_status(
    State(state): State<AppState>,
    Query(query): Query<ConnectionQuery>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(query.agent_id.as_deref(), "Agent id")?;

    let response = state
        .gateway
        .send(
            &state.mirror_api,
            OutboundRequest::get("/farcaster/status").query("agentId", agent_id),
        )
        .await
        .map_err(|e| e.with_message("Failed to fetch Farcaster connection status"))?;

    Ok(Json(response))
}

pub async fn unlink_farcaster(
    State(state): State<AppState>,
    Query(query): Query<ConnectionQuery>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(query.agent_id.as_deref(), "Agent id")?;

    let response = state
        .gateway
        .send(
            &state.mirror_api,
            OutboundRequest::delete("/farcaster/link").query("agentId", agent_id),
        )
        .await
        .map_err(|e| e.with_message("Failed to unlink Farcaster account"))?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTelegramRequest {
    pub agent_id: Option<String>,
    pub chat_id: Option<i64>,
}

pub async fn link_telegram(
    State(state): State<AppState>,
    Json(body): Json<LinkTelegramRequest>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(body.agent_id.as_deref(), "Agent id")?;
    let chat_id = body
        .chat_id
        .ok_or_else(|| GatewayError::validation("Chat id is required"))?;

    let response = state
        .gateway
        .send(
            &state.mirror_api,
            OutboundRequest::post("/telegram/link")
                .json(json!({ "agentId": agent_id, "chatId": chat_id })),
        )
        .await
        .map_err(|e| e.with_message("Failed to link Telegram chat"))?;

    Ok(Json(response))
}
