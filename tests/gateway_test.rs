//! Integration tests for the gateway's forwarding behavior.

use serde_json::{json, Value};

mod common;

use common::{closed_port, gateway_config, start_gateway, start_mock_upstream};

#[tokio::test]
async fn user_lookup_is_passed_through_verbatim() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, r#"{"id":1}"#.into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{addr}/api/user"))
        .query(&[("address", "0xABC")])
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"id": 1}));

    let seen = mirror.last_request().expect("upstream saw no request");
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.path, "/user/0xabc");
    assert_eq!(seen.headers.get("x-api-key").map(String::as_str), Some("mirror-test-key"));
}

#[tokio::test]
async fn missing_required_field_short_circuits_with_no_outbound_call() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, "{}".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/api/user"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Address is required");

    let res = client
        .post(format!("http://{addr}/api/posts"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Agent id is required");

    assert_eq!(mirror.calls(), 0, "validation failures must not reach the upstream");
    assert_eq!(agent.calls(), 0);
}

#[tokio::test]
async fn fees_route_requires_pool_address() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, "{}".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/api/agent-fees"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Pool address is required");
    assert_eq!(agent.calls(), 0, "fee estimator must not be called");
}

#[tokio::test]
async fn fees_route_lowercases_pool_address() {
    let agent = start_mock_upstream(|_| (200, r#"{"feeWei":"1000"}"#.into())).await;
    let mirror = start_mock_upstream(|_| (200, "{}".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/api/agent-fees"))
        .query(&[("poolAddress", "0xDEADbeef")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let seen = agent.last_request().unwrap();
    assert_eq!(seen.path, "/fees/estimate?poolAddress=0xdeadbeef");
}

#[tokio::test]
async fn upstream_error_status_is_propagated_with_envelope() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (404, r#"{"reason":"no such user"}"#.into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/api/user"))
        .query(&[("address", "0xabc")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch user");
    assert_eq!(body["status"], 404);
    assert_eq!(body["details"]["reason"], "no such user");
}

#[tokio::test]
async fn transport_failure_maps_to_500() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let dead = closed_port().await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, dead)).await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/api/user"))
        .query(&[("address", "0xabc")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch user");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn identical_requests_are_not_deduplicated() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, r#"{"id":1}"#.into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let client = reqwest::Client::new();
    for _ in 0..2 {
        let res = client
            .get(format!("http://{addr}/api/user"))
            .query(&[("address", "0xabc")])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    assert_eq!(mirror.calls(), 2, "each inbound request makes its own outbound call");
}

#[tokio::test]
async fn finalize_wraps_upstream_payload() {
    let agent = start_mock_upstream(|_| (200, r#"{"pool":"0x1","ok":true}"#.into())).await;
    let mirror = start_mock_upstream(|_| (200, "{}".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/api/agents/agent-1/finalize"))
        .json(&json!({"txHash": "0x9f"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["finalizeResponse"]["pool"], "0x1");
    assert_eq!(body["finalizeResponse"]["ok"], true);

    let seen = agent.last_request().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/agents/agent-1/finalize");
    let forwarded: Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(forwarded["txHash"], "0x9f");
}

#[tokio::test]
async fn twitter_link_keeps_503_semantics() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (503, r#"{"error":"oauth timeout"}"#.into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/api/social/twitter/link"))
        .json(&json!({"agentId": "a1", "username": "mira"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 503);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Twitter service unavailable or timed out");
}

#[tokio::test]
async fn scheduled_posts_appends_only_present_bounds() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, "[]".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/api/posts/scheduled"))
        .query(&[("agentId", "a1"), ("from", "2026-08-01")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let seen = mirror.last_request().unwrap();
    assert!(seen.path.starts_with("/posts/scheduled?"));
    assert!(seen.path.contains("agentId=a1"));
    assert!(seen.path.contains("from=2026-08-01"));
    assert!(!seen.path.contains("to="), "absent bound must not be forwarded");
}

#[tokio::test]
async fn delete_post_forwards_method_and_path() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, r#"{"deleted":true}"#.into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let res = reqwest::Client::new()
        .delete(format!("http://{addr}/api/posts/post-7"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let seen = mirror.last_request().unwrap();
    assert_eq!(seen.method, "DELETE");
    assert_eq!(seen.path, "/posts/post-7");
}

#[tokio::test]
async fn create_agent_forwards_multipart_form() {
    let agent = start_mock_upstream(|_| (200, r#"{"agentId":"a9"}"#.into())).await;
    let mirror = start_mock_upstream(|_| (200, "{}".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let form = reqwest::multipart::Form::new()
        .text("name", "Burrow")
        .text("ticker", "BRW")
        .text("description", "digs tunnels");

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/api/agents"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["agentId"], "a9");

    let seen = agent.last_request().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/agents");
    assert!(seen
        .headers
        .get("content-type")
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false));
    assert!(seen.body.contains("Burrow"));
    assert!(seen.body.contains("BRW"));
}

#[tokio::test]
async fn create_agent_requires_name_and_ticker() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, "{}".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let form = reqwest::multipart::Form::new().text("name", "Burrow");

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/api/agents"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Agent ticker is required");
    assert_eq!(agent.calls(), 0);
}

#[tokio::test]
async fn reload_rejects_absolute_endpoints() {
    let agent = start_mock_upstream(|_| (200, "{}".into())).await;
    let mirror = start_mock_upstream(|_| (200, "{}".into())).await;
    let (addr, _shutdown) = start_gateway(gateway_config(agent.addr, mirror.addr)).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("http://{addr}/api/agents/a1/reload"))
        .json(&json!({"endpoint": "http://evil.example/reload"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    assert_eq!(agent.calls(), 0, "rejected endpoint must not be dialed");

    let res = client
        .post(format!("http://{addr}/api/agents/a1/reload"))
        .json(&json!({"endpoint": "/agents/a1/reload"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let seen = agent.last_request().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/agents/a1/reload");
}
