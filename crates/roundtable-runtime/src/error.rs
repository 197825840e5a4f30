//! Error types for the conversation runtime

use roundtable_chat::TopologyError;
use roundtable_core::RoundtableError;
use roundtable_hitl::InputError;
use roundtable_llm::LLMError;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that can occur while driving a conversation
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Driver not configured properly
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A message was appended to a terminal conversation
    #[error("Conversation closed")]
    ConversationClosed,

    /// A turn was appended before the task was submitted
    #[error("Conversation has no task yet")]
    TaskNotSubmitted,

    /// The task was submitted twice
    #[error("Task already submitted")]
    TaskAlreadySubmitted,

    /// A message emitter failed
    #[error("Emitter failed for role {role}: {message}")]
    Emitter {
        /// Role whose turn failed
        role: String,
        /// Failure description
        message: String,
    },

    /// LLM provider error
    #[error("LLM error: {0}")]
    LLM(#[from] LLMError),

    /// Human-input strategy error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Topology configuration error
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Generic error from roundtable-core
    #[error(transparent)]
    CoreError(#[from] RoundtableError),
}

impl DriverError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an emitter error
    pub fn emitter<R: Into<String>, M: Into<String>>(role: R, message: M) -> Self {
        Self::Emitter {
            role: role.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DriverError::config("missing emitter");
        assert!(matches!(err, DriverError::Configuration(_)));
    }

    #[test]
    fn test_emitter_error_display() {
        let err = DriverError::emitter("Planner", "script exhausted");
        assert_eq!(
            err.to_string(),
            "Emitter failed for role Planner: script exhausted"
        );
    }
}
