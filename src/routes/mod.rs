//! Gateway routes.
//!
//! Every `/api` endpoint validates its required fields, makes exactly one
//! outbound call through the shared forwarder, and relays the result.
//! `/healthz` and `/status` are answered locally.

pub mod agents;
pub mod mirror;
pub mod social;
pub mod webhook;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Ops
        .route("/healthz", get(healthz))
        .route("/status", get(status))
        // Agent runtime
        .route("/api/agents", post(agents::create_agent))
        .route("/api/agents/{agent_id}", get(agents::get_agent))
        .route("/api/agents/{agent_id}/reload", post(agents::reload_agent))
        .route("/api/agents/{agent_id}/finalize", post(agents::finalize_agent))
        .route("/api/agent-fees", get(agents::estimate_fees))
        // Mirror
        .route("/api/user", get(mirror::get_user))
        .route("/api/posts", post(mirror::create_post))
        .route("/api/posts/scheduled", get(mirror::list_scheduled_posts))
        .route(
            "/api/posts/{post_id}",
            get(mirror::get_post).delete(mirror::delete_post),
        )
        // Social connections (brokered by the mirror service)
        .route(
            "/api/social/twitter/link",
            post(social::link_twitter).delete(social::unlink_twitter),
        )
        .route("/api/social/twitter/status", get(social::twitter_status))
        .route(
            "/api/social/farcaster/link",
            post(social::link_farcaster).delete(social::unlink_farcaster),
        )
        .route("/api/social/farcaster/status", get(social::farcaster_status))
        .route("/api/social/telegram/link", post(social::link_telegram))
        // Inbound webhook
        .route("/api/webhook/telegram", post(webhook::telegram_webhook))
        // Fallback: return 404 for unknown endpoints
        .fallback(not_found)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct StatusResponse {
    version: &'static str,
    upstreams: Vec<&'static str>,
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        upstreams: vec![state.agent_api.name(), state.mirror_api.name()],
    })
}
