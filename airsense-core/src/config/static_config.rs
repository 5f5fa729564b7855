//! Static configuration loaded once at startup
//!
//! This configuration is read-only after the daemon starts.

use serde::{Deserialize, Serialize};

use crate::device;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server hostname
    pub hostname: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 5000,
        }
    }
}

/// Serial transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial device path; discovered by VID/PID when unset
    #[serde(default)]
    pub device: Option<String>,
    /// Baud rate
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

fn default_baud_rate() -> u32 {
    device::BAUD_RATE
}

fn default_read_timeout_ms() -> u64 {
    device::DEFAULT_READ_TIMEOUT_MS
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: None,
            baud_rate: default_baud_rate(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

/// In-memory reading cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of readings retained, oldest evicted first
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_history_capacity() -> usize {
    100
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

/// Time-series sink configuration (ThingSpeak-style update endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Whether accepted readings are forwarded at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sink update URL
    #[serde(default = "default_sink_url")]
    pub url: String,
    /// Sink write API key
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_sink_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_sink_url() -> String {
    "https://api.thingspeak.com/update".to_string()
}

fn default_sink_timeout_secs() -> u64 {
    5
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_sink_url(),
            api_key: String::new(),
            timeout_secs: default_sink_timeout_secs(),
        }
    }
}

/// Advisor (RAG webhook) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Webhook URL of the RAG chat service
    #[serde(default = "default_advisor_url")]
    pub url: String,
    /// Session id used for recommendation requests
    #[serde(default)]
    pub recommendation_session: String,
    /// Session id used for free-form chat requests
    #[serde(default)]
    pub chat_session: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_advisor_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_advisor_url() -> String {
    "http://localhost:5678/webhook/airsense/ragchat".to_string()
}

fn default_advisor_timeout_secs() -> u64 {
    30
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            url: default_advisor_url(),
            recommendation_session: String::new(),
            chat_session: String::new(),
            timeout_secs: default_advisor_timeout_secs(),
        }
    }
}

/// Static configuration for the Airsense daemon.
///
/// Located at `~/.config/airsense/config.toml` by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Serial transport settings
    #[serde(default)]
    pub serial: SerialConfig,

    /// Reading cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Time-series sink settings
    #[serde(default)]
    pub sink: SinkConfig,

    /// Advisor service settings
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

impl StaticConfig {
    /// Parse StaticConfig from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize StaticConfig to a TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_static_config() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.hostname, "localhost");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.serial.read_timeout_ms, 1000);
        assert_eq!(config.cache.history_capacity, 100);
        assert!(config.sink.enabled);
    }

    #[test]
    fn test_static_config_serialization() {
        let config = StaticConfig::default();
        let toml_str = config.to_toml().unwrap();

        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[serial]"));
        assert!(toml_str.contains("[cache]"));
        assert!(toml_str.contains("[sink]"));
        assert!(toml_str.contains("[advisor]"));
    }

    #[test]
    fn test_static_config_deserialization() {
        let toml_str = r#"
            [server]
            hostname = "0.0.0.0"
            port = 8080

            [serial]
            device = "/dev/ttyUSB0"
            read_timeout_ms = 250

            [cache]
            history_capacity = 10

            [sink]
            url = "https://api.thingspeak.com/update"
            api_key = "ABCDEF"
            timeout_secs = 2

            [advisor]
            url = "http://10.0.0.2:5678/webhook/airsense/ragchat"
            recommendation_session = "r-session"
            chat_session = "c-session"
        "#;

        let config = StaticConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.server.hostname, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.serial.device.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(config.serial.baud_rate, 115_200); // defaulted
        assert_eq!(config.serial.read_timeout_ms, 250);
        assert_eq!(config.cache.history_capacity, 10);
        assert_eq!(config.sink.api_key, "ABCDEF");
        assert_eq!(config.advisor.recommendation_session, "r-session");
        assert_eq!(config.advisor.timeout_secs, 30); // defaulted
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config = StaticConfig::from_toml("[server]\nport = 9000\nhostname = \"h\"").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.history_capacity, 100);
        assert!(config.serial.device.is_none());
    }

    #[test]
    fn test_partial_sink_and_advisor_tables_parse() {
        let config = StaticConfig::from_toml(
            "[sink]\nenabled = false\n\n[advisor]\nchat_session = \"c\"",
        )
        .unwrap();
        assert!(!config.sink.enabled);
        assert_eq!(config.sink.url, "https://api.thingspeak.com/update");
        assert_eq!(config.advisor.chat_session, "c");
        assert_eq!(
            config.advisor.url,
            "http://localhost:5678/webhook/airsense/ragchat"
        );
    }

    #[test]
    fn test_static_config_round_trip() {
        let mut config = StaticConfig::default();
        config.cache.history_capacity = 42;
        config.sink.api_key = "KEY".to_string();

        let back = StaticConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(back.cache.history_capacity, 42);
        assert_eq!(back.sink.api_key, "KEY");
    }
}
