//! Error types for the Airsense system

use thiserror::Error;

use crate::types::DecodeReason;

/// Core error type for Airsense operations
#[derive(Error, Debug)]
pub enum AirsenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serial port errors
    #[error("Serial port error: {0}")]
    Serial(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A line from the device could not be decoded (non-fatal, per-line)
    #[error("Decode error ({reason}): {detail}")]
    Decode {
        reason: DecodeReason,
        detail: String,
    },

    /// Forwarding a reading to the time-series sink failed
    #[error("Forward error: {0}")]
    Forward(String),

    /// The advisor (RAG) service call failed
    #[error("Advisor error: {0}")]
    Advisor(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Operation timed out
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// No sensor hub found during port enumeration
    #[error("Device not found")]
    DeviceNotFound,

    /// Device disconnected (USB unplugged, power cycle)
    #[error("Device disconnected: {0}")]
    DeviceDisconnected(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Airsense operations
pub type Result<T> = std::result::Result<T, AirsenseError>;

impl AirsenseError {
    /// Shorthand for a per-line decode failure.
    pub fn decode(reason: DecodeReason, detail: impl Into<String>) -> Self {
        AirsenseError::Decode {
            reason,
            detail: detail.into(),
        }
    }

    /// Whether this error is a per-line decode failure the ingestion loop
    /// should absorb rather than propagate.
    pub fn is_decode(&self) -> bool {
        matches!(self, AirsenseError::Decode { .. })
    }
}

impl From<serde_json::Error> for AirsenseError {
    fn from(err: serde_json::Error) -> Self {
        AirsenseError::Serialization(err.to_string())
    }
}
