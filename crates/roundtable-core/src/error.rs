//! Error types for the roundtable engine
//!
//! This module defines the base error type shared by the workspace crates.
//! Domain crates wrap it with their own, more specific error enums.

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, RoundtableError>;

/// Base error type for the roundtable engine
#[derive(Debug, thiserror::Error)]
pub enum RoundtableError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration parsing errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl RoundtableError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
