//! Configuration management for the roundtable engine
//!
//! Configuration is loaded from multiple sources:
//! - Default values
//! - Configuration files (TOML, JSON, YAML)
//! - Environment variables (prefix `ROUNDTABLE`)
//!
//! Chat settings are validated on load: a conversation must never start with
//! a zero round ceiling or an empty termination token.

use crate::error::{Result, RoundtableError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the roundtable engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundtableConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Group-chat settings
    pub chat: ChatSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format
    #[serde(default)]
    pub json: bool,
}

/// Settings governing one group-chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Sentinel substring that ends a conversation when it appears in a
    /// message. Matched case-sensitively.
    #[serde(default = "default_termination_token")]
    pub termination_token: String,

    /// Hard ceiling on scheduled turns per conversation
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Default LLM provider for generating roles
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Default model for generating roles
    #[serde(default = "default_model")]
    pub model: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_termination_token() -> String {
    "TERMINATE".to_string()
}

fn default_max_rounds() -> usize {
    50
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4-turbo".to_string()
}

impl ChatSettings {
    /// Reject settings no conversation may start with
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(RoundtableError::config(
                "max_rounds must be a positive integer",
            ));
        }
        if self.termination_token.is_empty() {
            return Err(RoundtableError::config(
                "termination_token must not be empty",
            ));
        }
        Ok(())
    }
}

impl Default for RoundtableConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: default_log_level(),
                json: false,
            },
            chat: ChatSettings {
                termination_token: default_termination_token(),
                max_rounds: default_max_rounds(),
                provider: default_provider(),
                model: default_model(),
            },
        }
    }
}

/// Load configuration from a file
///
/// Supports TOML, JSON, and YAML formats based on file extension.
/// Environment variables with the `ROUNDTABLE` prefix override file values.
///
/// # Example
///
/// ```no_run
/// use roundtable_core::config::load_config;
///
/// let config = load_config("config.toml").unwrap();
/// println!("Round ceiling: {}", config.chat.max_rounds);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RoundtableConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RoundtableError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("ROUNDTABLE").separator("__"))
        .build()?;

    let config: RoundtableConfig = settings.try_deserialize()?;
    config.chat.validate()?;

    tracing::info!("Configuration loaded from {}", path.display());

    Ok(config)
}

/// Load configuration with defaults if file doesn't exist
///
/// This is useful for optional configuration files.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> RoundtableConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            RoundtableConfig::default()
        }
    }
}
