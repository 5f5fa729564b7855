//! Airsense Core Library
//!
//! Shared types, models, and utilities for the Airsense collector project.
//! This crate is used by the hardware, daemon and CLI components.

pub mod api;
pub mod config;
pub mod device;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    default_config_path, AdvisorConfig, CacheConfig, SerialConfig, ServerConfig, SinkConfig,
    StaticConfig,
};
pub use device::*;
pub use error::*;
pub use types::*;
