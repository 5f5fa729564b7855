//! Time-series sink forwarding
//!
//! Accepted readings are forwarded to a ThingSpeak-style update endpoint, one
//! HTTP GET per reading with the fields as query parameters. Forwarding is
//! best effort: a failed forward is logged by the caller and the reading stays
//! in the cache. The request carries its own short timeout so an unreachable
//! sink cannot stall ingestion.

use airsense_core::{AirsenseError, Reading, Result, StaticConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Destination for accepted readings.
///
/// Trait so the ingestion loop can be tested with a recording mock instead of
/// a live endpoint.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Forward one reading; non-2xx responses are failures.
    async fn forward(&self, reading: &Reading) -> Result<()>;
}

/// Forwarder for the ThingSpeak update API.
///
/// Field mapping follows the channel layout: field1=temperature,
/// field2=humidity, field3=eco2, field4=tvoc, field5=aqi.
pub struct ThingSpeakForwarder {
    client: reqwest::Client,
    write_url: String,
    api_key: String,
}

impl ThingSpeakForwarder {
    pub fn new(write_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client with static configuration");

        Self {
            client,
            write_url: write_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a forwarder from the `[sink]` config section.
    pub fn from_config(config: &StaticConfig) -> Self {
        Self::new(
            &config.sink.url,
            &config.sink.api_key,
            Duration::from_secs(config.sink.timeout_secs),
        )
    }

    fn query(&self, reading: &Reading) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", self.api_key.clone()),
            ("field1", format!("{:.2}", reading.temperature)),
            ("field2", format!("{:.2}", reading.humidity)),
            ("field3", reading.eco2.to_string()),
            ("field4", reading.tvoc.to_string()),
            ("field5", reading.aqi.to_string()),
        ]
    }
}

#[async_trait]
impl Forwarder for ThingSpeakForwarder {
    async fn forward(&self, reading: &Reading) -> Result<()> {
        let response = self
            .client
            .get(&self.write_url)
            .query(&self.query(reading))
            .send()
            .await
            .map_err(|e| AirsenseError::Forward(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AirsenseError::Forward(format!(
                "sink responded with status {}",
                status
            )));
        }

        debug!("Sink accepted reading (status {})", status);
        Ok(())
    }
}

/// Forwarder that drops every reading, for `[sink] enabled = false` and mock
/// mode.
pub struct NullForwarder;

#[async_trait]
impl Forwarder for NullForwarder {
    async fn forward(&self, _reading: &Reading) -> Result<()> {
        Ok(())
    }
}
