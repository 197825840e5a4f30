//! Per-conversation state
//!
//! A conversation owns its transcript and round counter and walks a small
//! state machine: `AwaitingTask` until the task arrives, `InTurn` while
//! roles speak, `Terminal` once a stop condition holds. `Terminal` is
//! absorbing: a closed conversation accepts no further messages.

use serde::{Deserialize, Serialize};

use roundtable_chat::{ChatMessage, Transcript};

use crate::error::{DriverError, Result};

/// Lifecycle state of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// No messages yet; waiting for the initial task
    AwaitingTask,
    /// Roles are taking turns
    InTurn,
    /// Conversation over; absorbing
    Terminal,
}

/// Why a conversation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A message carried the termination token
    TerminationToken,
    /// The transition table permitted no next speaker
    NoAllowedSpeaker,
    /// The round ceiling was reached
    RoundLimitReached,
    /// The emitter failed twice for the same turn
    EmitterFailed,
    /// The human-input strategy timed out or was cancelled
    InputUnavailable,
}

impl StopReason {
    /// Whether the conversation ran to an intended end
    ///
    /// A ceiling-exhausted conversation is incomplete: the transcript is
    /// whatever existed when the ceiling hit, and callers should present it
    /// as such.
    pub fn is_complete(&self) -> bool {
        !matches!(self, StopReason::RoundLimitReached)
    }
}

/// One run of a group chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique identifier
    id: String,

    /// The append-only message history
    transcript: Transcript,

    /// Scheduled turns taken so far (the task message is round zero)
    rounds: usize,

    /// Lifecycle state
    state: ConversationState,

    /// Set while the driver waits for a human turn
    awaiting_external_input: bool,

    /// Why the conversation stopped, once terminal
    stop_reason: Option<StopReason>,
}

impl Conversation {
    /// Create a conversation awaiting its task
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            transcript: Transcript::new(),
            rounds: 0,
            state: ConversationState::AwaitingTask,
            awaiting_external_input: false,
            stop_reason: None,
        }
    }

    /// Unique conversation id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// The message history
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Scheduled turns taken (excludes the task message)
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Whether the driver is waiting for a human turn
    pub fn awaiting_external_input(&self) -> bool {
        self.awaiting_external_input
    }

    /// Why the conversation stopped, if it has
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Whether the conversation is over
    pub fn is_terminal(&self) -> bool {
        self.state == ConversationState::Terminal
    }

    /// Whether the conversation is over and ran to an intended end
    pub fn is_complete(&self) -> bool {
        self.stop_reason.map(|r| r.is_complete()).unwrap_or(false)
    }

    /// Submit the initial task as a message from `role`
    ///
    /// Moves `AwaitingTask -> InTurn`. The task message does not count as a
    /// scheduled round.
    pub fn begin(&mut self, role: &str, task: &str) -> Result<&ChatMessage> {
        match self.state {
            ConversationState::AwaitingTask => {
                self.state = ConversationState::InTurn;
                Ok(self.transcript.append(role, task))
            }
            ConversationState::InTurn => Err(DriverError::TaskAlreadySubmitted),
            ConversationState::Terminal => Err(DriverError::ConversationClosed),
        }
    }

    /// Append a scheduled turn from `role`, incrementing the round counter
    pub fn append(&mut self, role: &str, content: impl Into<String>) -> Result<&ChatMessage> {
        match self.state {
            ConversationState::InTurn => {
                self.rounds += 1;
                Ok(self.transcript.append(role, content))
            }
            ConversationState::AwaitingTask => Err(DriverError::TaskNotSubmitted),
            ConversationState::Terminal => Err(DriverError::ConversationClosed),
        }
    }

    /// Mark the driver as waiting (or no longer waiting) for human input
    pub fn set_awaiting_input(&mut self, waiting: bool) {
        self.awaiting_external_input = waiting;
    }

    /// Close the conversation with a stop reason; absorbing
    pub fn close(&mut self, reason: StopReason) {
        if self.state != ConversationState::Terminal {
            self.state = ConversationState::Terminal;
            self.stop_reason = Some(reason);
            self.awaiting_external_input = false;
            tracing::info!(
                "Conversation {} terminal after {} rounds: {:?}",
                self.id,
                self.rounds,
                reason
            );
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_awaits_task() {
        let conversation = Conversation::new();
        assert_eq!(conversation.state(), ConversationState::AwaitingTask);
        assert_eq!(conversation.rounds(), 0);
        assert!(!conversation.is_terminal());
        assert!(conversation.stop_reason().is_none());
    }

    #[test]
    fn test_begin_moves_to_in_turn() {
        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();

        assert_eq!(conversation.state(), ConversationState::InTurn);
        assert_eq!(conversation.transcript().len(), 1);
        // The task message is not a scheduled round
        assert_eq!(conversation.rounds(), 0);
    }

    #[test]
    fn test_begin_twice_rejected() {
        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();

        let result = conversation.begin("Admin", "again");
        assert!(matches!(result, Err(DriverError::TaskAlreadySubmitted)));
    }

    #[test]
    fn test_append_before_task_rejected() {
        let mut conversation = Conversation::new();
        let result = conversation.append("Planner", "Plan ready");
        assert!(matches!(result, Err(DriverError::TaskNotSubmitted)));
    }

    #[test]
    fn test_append_counts_rounds() {
        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();
        conversation.append("Planner", "Plan ready").unwrap();
        conversation.append("Admin", "Go ahead").unwrap();

        assert_eq!(conversation.rounds(), 2);
        assert_eq!(conversation.transcript().len(), 3);
    }

    #[test]
    fn test_closed_conversation_rejects_appends() {
        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();
        conversation.close(StopReason::TerminationToken);

        let result = conversation.append("Planner", "too late");
        assert!(matches!(result, Err(DriverError::ConversationClosed)));
        assert_eq!(conversation.transcript().len(), 1);
    }

    #[test]
    fn test_close_is_absorbing() {
        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();
        conversation.close(StopReason::TerminationToken);
        // A second close does not overwrite the reason
        conversation.close(StopReason::RoundLimitReached);

        assert_eq!(
            conversation.stop_reason(),
            Some(StopReason::TerminationToken)
        );
    }

    #[test]
    fn test_completeness() {
        assert!(StopReason::TerminationToken.is_complete());
        assert!(StopReason::NoAllowedSpeaker.is_complete());
        assert!(!StopReason::RoundLimitReached.is_complete());

        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();
        assert!(!conversation.is_complete());

        conversation.close(StopReason::RoundLimitReached);
        assert!(conversation.is_terminal());
        assert!(!conversation.is_complete());
    }

    #[test]
    fn test_awaiting_input_flag() {
        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();

        conversation.set_awaiting_input(true);
        assert!(conversation.awaiting_external_input());

        // Closing clears the flag
        conversation.close(StopReason::InputUnavailable);
        assert!(!conversation.awaiting_external_input());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut conversation = Conversation::new();
        conversation.begin("Admin", "Summarize X").unwrap();

        let json = serde_json::to_string(&conversation).unwrap();
        let deserialized: Conversation = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id(), conversation.id());
        assert_eq!(deserialized.state(), ConversationState::InTurn);
    }
}
