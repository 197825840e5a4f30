//! Termination policy for a conversation
//!
//! A conversation ends when the round ceiling is reached, when a message
//! carries the termination token, or when the transition table permits no
//! next speaker. The check runs after every appended message, before the
//! scheduler is consulted again.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};
use crate::message::ChatMessage;
use crate::table::TransitionTable;

/// When a conversation stops
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationPolicy {
    /// Sentinel substring ending the conversation; matched case-sensitively
    token: String,

    /// Hard ceiling on scheduled turns
    max_rounds: usize,
}

impl TerminationPolicy {
    /// Create a policy, rejecting settings no conversation may start with
    pub fn new(token: impl Into<String>, max_rounds: usize) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(TopologyError::policy("termination token must not be empty"));
        }
        if max_rounds == 0 {
            return Err(TopologyError::policy("max_rounds must be positive"));
        }
        Ok(Self { token, max_rounds })
    }

    /// The configured termination token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The configured round ceiling
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Case-sensitive substring match of the token against message content
    pub fn contains_token(&self, content: &str) -> bool {
        content.contains(&self.token)
    }

    /// Whether the conversation is over after this message
    ///
    /// True when the round ceiling is reached, the message carries the
    /// token, or the table permits no speaker after the message's sender.
    pub fn is_terminal(
        &self,
        message: &ChatMessage,
        round_count: usize,
        table: &TransitionTable,
    ) -> bool {
        round_count >= self.max_rounds
            || self.contains_token(&message.content)
            || table.allowed_after(&message.sender).is_empty()
    }
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self {
            token: "TERMINATE".to_string(),
            max_rounds: 50,
        }
    }
}
