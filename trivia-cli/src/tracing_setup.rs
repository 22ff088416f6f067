//! Tracing setup for the trivia CLI
//!
//! Usage:
//!   trivia --debug serve             # Debug logging to console
//!   RUST_LOG=trivia_server=debug ... # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                         # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (unless RUST_LOG is set)
    pub debug: bool,
}

impl TracingConfig {
    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
