//! Error types for the entire application.
//!
//! The timing core itself cannot fail. Errors only show up at the edges:
//! loading configuration and serializing structured output.
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading tracer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Unknown output style: {0}")]
    UnknownStyle(String),
}

/// Errors that can occur while producing output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
