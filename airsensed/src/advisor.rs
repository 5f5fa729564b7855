//! Advisor (RAG webhook) client
//!
//! Thin proxy to an external retrieval-augmented chat service. A reading is
//! rendered into a fixed natural-language analysis prompt and posted together
//! with a session identifier; free-form chat messages are forwarded verbatim
//! under a separate session. The service's own semantics are opaque to the
//! daemon.

use airsense_core::{AdvisorConfig, AirsenseError, Reading, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct AdvisorRequest<'a> {
    #[serde(rename = "sessionId")]
    session_id: &'a str,
    action: &'static str,
    #[serde(rename = "chatInput")]
    chat_input: &'a str,
}

#[derive(Debug, Deserialize)]
struct AdvisorReply {
    #[serde(default)]
    output: String,
}

/// HTTP client for the advisor webhook.
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    client: reqwest::Client,
    url: String,
    recommendation_session: String,
    chat_session: String,
}

impl AdvisorClient {
    /// Build a client from the `[advisor]` config section.
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("reqwest client with static configuration");

        Self {
            client,
            url: config.url.clone(),
            recommendation_session: config.recommendation_session.clone(),
            chat_session: config.chat_session.clone(),
        }
    }

    /// Ask the service to analyze the given reading and produce actionable
    /// recommendations.
    pub async fn recommendation(&self, reading: &Reading) -> Result<String> {
        let prompt = recommendation_prompt(reading);
        debug!("Requesting recommendation for {:?}", reading);
        self.call(&prompt, &self.recommendation_session).await
    }

    /// Forward a free-form chat message.
    pub async fn chat(&self, message: &str) -> Result<String> {
        debug!("Forwarding chat message ({} chars)", message.len());
        self.call(message, &self.chat_session).await
    }

    async fn call(&self, chat_input: &str, session_id: &str) -> Result<String> {
        let body = AdvisorRequest {
            session_id,
            action: "sendMessage",
            chat_input,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AirsenseError::Advisor(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AirsenseError::Advisor(format!(
                "service responded with status {}",
                status
            )));
        }

        // The webhook answers with an array of replies; only the first matters.
        let replies: Vec<AdvisorReply> = response
            .json()
            .await
            .map_err(|e| AirsenseError::Advisor(format!("unreadable response: {}", e)))?;

        replies
            .into_iter()
            .next()
            .map(|r| r.output)
            .ok_or_else(|| AirsenseError::Advisor("empty response".to_string()))
    }
}

/// Render a reading into the fixed analysis prompt.
fn recommendation_prompt(reading: &Reading) -> String {
    format!(
        "given air quality data: temperature {:.1} C, humidity {:.1} %, eco2 {} ppm, \
         tvoc {} ppb, aqi {}. analyze each parameter whether it is normal or too low or \
         too high; if not normal, specify it in your response, give known consequences of \
         such an abnormal parameter, and give actionable recommendations to the user such \
         as opening a window, turning up the integrated humidifier or purifier fan, or \
         vacuuming the room",
        reading.temperature, reading.humidity, reading.eco2, reading.tvoc, reading.aqi
    )
}
