//! The append-only conversation transcript
//!
//! The transcript is the sole piece of mutable state a conversation shares
//! between turns. It only ever grows: messages are never reordered, edited,
//! or removed within one conversation.

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// An ordered, append-only sequence of messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append a message, assigning it the next sequence position
    pub fn append(
        &mut self,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> &ChatMessage {
        let seq = self.messages.len();
        self.messages.push(ChatMessage::new(sender, content, seq));
        // push cannot leave the vec empty
        self.messages.last().expect("just appended")
    }

    /// All messages, in order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent message
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Name of the role that spoke last
    pub fn last_speaker(&self) -> Option<&str> {
        self.messages.last().map(|m| m.sender.as_str())
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
