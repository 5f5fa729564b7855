//! Airsense CLI Library
//!
//! Core functionality for the `airsensectl` tool.
//!
//! The primary public API is [`client::AirsenseClient`], which provides
//! programmatic access to the Airsense daemon. Configuration types are
//! available via [`config::CliConfig`].

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for communicating with the Airsense daemon.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;
