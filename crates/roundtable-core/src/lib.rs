//! Roundtable Core
//!
//! This crate provides the shared plumbing for the roundtable group-chat
//! engine: error handling, configuration loading, and logging setup.

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{load_config, load_config_or_default, ChatSettings, RoundtableConfig};
pub use error::{Result, RoundtableError};
pub use logging::init_logging;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        // Basic smoke test - verify module exports are accessible
        let config = RoundtableConfig::default();
        assert_eq!(config.chat.termination_token, "TERMINATE");
    }
}
