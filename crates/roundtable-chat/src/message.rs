//! Messages in a conversation transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message in a conversation
///
/// Immutable once appended to a transcript. The sequence number is the
/// message's index in its transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Name of the role that produced this message
    pub sender: String,

    /// Textual content
    pub content: String,

    /// Position in the transcript
    pub seq: usize,

    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message at a given transcript position
    pub fn new(sender: impl Into<String>, content: impl Into<String>, seq: usize) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            seq,
            timestamp: Utc::now(),
        }
    }
}
