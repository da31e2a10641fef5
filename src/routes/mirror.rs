//! Mirror service routes: user lookup and posts.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::fields::{normalize_address, path_segment, require_field};
use crate::gateway::{GatewayError, OutboundRequest};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub address: Option<String>,
}

/// Look up a user by wallet address. Addresses are lowercased before
/// forwarding so the mirror service sees a canonical form.
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, GatewayError> {
    let address = normalize_address(query.address.as_deref(), "Address")?;

    let response = state
        .gateway
        .send(&state.mirror_api, OutboundRequest::get(format!("/user/{address}")))
        .await
        .map_err(|e| e.with_message("Failed to fetch user"))?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub agent_id: Option<String>,
    pub content: Option<String>,
    pub scheduled_at: Option<String>,
}

/// Create a post, optionally scheduled for later publication.
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(body.agent_id.as_deref(), "Agent id")?;
    let content = require_field(body.content.as_deref(), "Content")?;

    let mut payload = json!({ "agentId": agent_id, "content": content });
    if let Some(scheduled_at) = non_blank(body.scheduled_at.as_deref()) {
        payload["scheduledAt"] = Value::String(scheduled_at.to_string());
    }

    let response = state
        .gateway
        .send(&state.mirror_api, OutboundRequest::post("/posts").json(payload))
        .await
        .map_err(|e| e.with_message("Failed to create post"))?;

    Ok(Json(response))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let post_id = path_segment(&post_id, "Post id")?;

    let response = state
        .gateway
        .send(&state.mirror_api, OutboundRequest::get(format!("/posts/{post_id}")))
        .await
        .map_err(|e| e.with_message("Failed to fetch post"))?;

    Ok(Json(response))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let post_id = path_segment(&post_id, "Post id")?;

    let response = state
        .gateway
        .send(&state.mirror_api, OutboundRequest::delete(format!("/posts/{post_id}")))
        .await
        .map_err(|e| e.with_message("Failed to delete post"))?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPostsQuery {
    pub agent_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// List scheduled posts for an agent, optionally bounded by a date range.
/// Absent bounds are omitted from the outbound query entirely.
pub async fn list_scheduled_posts(
    State(state): State<AppState>,
    Query(query): Query<ScheduledPostsQuery>,
) -> Result<Json<Value>, GatewayError> {
    let agent_id = require_field(query.agent_id.as_deref(), "Agent id")?;

    let mut request = OutboundRequest::get("/posts/scheduled").query("agentId", agent_id);
    if let Some(from) = non_blank(query.from.as_deref()) {
        request = request.query("from", from);
    }
    if let Some(to) = non_blank(query.to.as_deref()) {
        request = request.query("to", to);
    }

    let response = state
        .gateway
        .send(&state.mirror_api, request)
        .await
        .map_err(|e| e.with_message("Failed to list scheduled posts"))?;

    Ok(Json(response))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
