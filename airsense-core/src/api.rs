//! API models for the Airsense REST API
//!
//! Request and response models shared between the daemon and the CLI client.

use crate::types::Reading;
use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ApiResponse<T> {
    #[serde(rename = "success")]
    Success { data: T },
    #[serde(rename = "error")]
    Error { error: String },
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Create an error response
    pub fn error(error: String) -> Self {
        Self::Error { error }
    }
}

/// Latest-reading response.
///
/// `reading` is `None` until the first sample has been decoded; an empty cache
/// is an expected startup transient, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<Reading>,
}

/// Historical-readings response (oldest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub readings: Vec<Reading>,
    pub count: usize,
}

/// AI recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub recommendation: String,
}

/// Chat proxy request
///
/// `message` defaults to empty when absent so a body without the field still
/// reaches the handler's validation (and its 400) instead of failing
/// extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Chat proxy response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Daemon information response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Daemon version
    pub version: String,
    /// Whether a sensor hub was connected at startup
    pub device_connected: bool,
    /// Serial device path, if connected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Daemon uptime in seconds
    pub uptime: u64,
    /// Number of readings currently cached
    pub history_len: usize,
    /// History capacity
    pub history_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_tagging() {
        let resp = ApiResponse::success(LatestResponse {
            reading: Some(Reading::new(21.5, 40.0, 410, 80, 1)),
        });
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["reading"]["temperature"], 21.5);
    }

    #[test]
    fn test_error_response_tagging() {
        let resp: ApiResponse<()> = ApiResponse::error("boom".to_string());
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_latest_response_omits_absent_reading() {
        let json = serde_json::to_value(LatestResponse { reading: None }).unwrap();
        assert!(json.get("reading").is_none());
    }

    #[test]
    fn test_chat_request_message_defaults_to_empty() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.message, "");

        let request: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn test_api_response_round_trip() {
        let resp = ApiResponse::success(HistoryResponse {
            readings: vec![Reading::new(20.0, 50.0, 400, 10, 1)],
            count: 1,
        });
        let json = serde_json::to_string(&resp).unwrap();
        let back: ApiResponse<HistoryResponse> = serde_json::from_str(&json).unwrap();

        match back {
            ApiResponse::Success { data } => {
                assert_eq!(data.count, 1);
                assert_eq!(data.readings[0].eco2, 400);
            }
            ApiResponse::Error { .. } => panic!("Expected success"),
        }
    }
}
