//! HTTP client for communicating with the Airsense daemon.

use airsense_core::api::{
    AdviceResponse, ApiResponse, ChatRequest, ChatResponse, HistoryResponse, InfoResponse,
    LatestResponse,
};
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Normalize a server URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP client for the Airsense daemon's REST API.
///
/// Decodes the daemon's tagged `ApiResponse` envelope and turns error
/// responses into `anyhow` errors with context.
#[derive(Debug, Clone)]
pub struct AirsenseClient {
    client: Client,
    base_url: String,
}

impl AirsenseClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `server_url` - Base URL of the daemon (e.g., "http://localhost:5000")
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(server_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("airsensectl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(server_url),
        })
    }

    /// Latest sensor reading (may be absent right after daemon startup).
    pub async fn get_latest(&self) -> Result<LatestResponse> {
        self.get("/sensor/latest").await
    }

    /// Cached reading history, oldest first.
    pub async fn get_history(&self) -> Result<HistoryResponse> {
        self.get("/sensor/history").await
    }

    /// AI recommendation for the latest reading.
    pub async fn get_advice(&self) -> Result<AdviceResponse> {
        self.get("/ai/advice").await
    }

    /// Daemon information.
    pub async fn get_info(&self) -> Result<InfoResponse> {
        self.get("/info").await
    }

    /// Send a chat message to the advisor proxy.
    pub async fn chat(&self, message: &str) -> Result<ChatResponse> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach daemon at {}", url))?;

        Self::decode(response.json().await.context("Malformed daemon response")?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach daemon at {}", url))?;

        Self::decode(response.json().await.context("Malformed daemon response")?)
    }

    fn decode<T>(response: ApiResponse<T>) -> Result<T> {
        match response {
            ApiResponse::Success { data } => Ok(data),
            ApiResponse::Error { error } => Err(anyhow!("Daemon error: {}", error)),
        }
    }
}
