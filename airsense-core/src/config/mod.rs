//! Configuration for the Airsense daemon
//!
//! Static configuration is loaded once at startup from a TOML file and stays
//! immutable for the process lifetime.

mod paths;
mod static_config;

pub use paths::default_config_path;
pub use static_config::{
    AdvisorConfig, CacheConfig, SerialConfig, ServerConfig, SinkConfig, StaticConfig,
};
