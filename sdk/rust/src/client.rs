use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(rename = "agentId")]
    pub agent_id: String,
    pub content: String,
    #[serde(rename = "scheduledAt", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            client: Client::new(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Look up a user by wallet address.
    pub async fn user(&self, address: &str) -> Result<Value, Box<dyn std::error::Error>> {
        self.get_json("/api/user", &[("address", address)]).await
    }

    /// Estimate token fees for a pool.
    pub async fn estimate_fees(&self, pool_address: &str) -> Result<Value, Box<dyn std::error::Error>> {
        self.get_json("/api/agent-fees", &[("poolAddress", pool_address)])
            .await
    }

    /// Create a post (optionally scheduled).
    pub async fn create_post(&self, req: CreatePostRequest) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/api/posts", self.gateway_url))
            .json(&req)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Raw GET against the gateway, for endpoints without a typed helper.
    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.client
            .get(format!("{}{}", self.gateway_url, path))
            .send()
            .await
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}{}", self.gateway_url, path))
            .query(query)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode(resp: Response) -> Result<Value, Box<dyn std::error::Error>> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("Gateway returned error status {}: {}", status, text).into());
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(e) => Err(e.into()),
        }
    }
}
