//! Error types for human-input strategies

use roundtable_core::RoundtableError;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors raised by input strategies
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Strategy-level failure
    #[error("Input strategy error: {0}")]
    Strategy(String),

    /// I/O failure while prompting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error from roundtable-core
    #[error(transparent)]
    CoreError(#[from] RoundtableError),
}

impl InputError {
    /// Create a strategy error
    pub fn strategy<S: Into<String>>(msg: S) -> Self {
        Self::Strategy(msg.into())
    }
}
