//! Error types for chat topology configuration

use roundtable_core::RoundtableError;

/// Result type for topology operations
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while configuring a conversation topology
///
/// All of these are configuration-time errors: a roster or transition table
/// that fails validation never reaches a running conversation.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// A transition table key or value names a role the roster doesn't declare
    #[error("Unknown role in transition table: {0}")]
    UnknownRole(String),

    /// The same role was declared twice in a roster
    #[error("Duplicate role declared: {0}")]
    DuplicateRole(String),

    /// A roster with no roles
    #[error("Roster must declare at least one role")]
    EmptyRoster,

    /// A transition table with no entries
    #[error("Transition table must have at least one entry")]
    EmptyTable,

    /// The designated initial role is not declared in the roster
    #[error("Initial role is not declared: {0}")]
    UndeclaredInitialRole(String),

    /// Invalid termination policy settings
    #[error("Invalid termination policy: {0}")]
    InvalidPolicy(String),

    /// Generic error from roundtable-core
    #[error(transparent)]
    CoreError(#[from] RoundtableError),
}

impl TopologyError {
    /// Create an invalid-policy error
    pub fn policy<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPolicy(msg.into())
    }
}
