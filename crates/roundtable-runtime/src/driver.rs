//! The conversation driver
//!
//! Runs one conversation from task submission to termination. Each turn:
//! check the termination conditions on the last message, ask the scheduler
//! who may speak, resolve one role, obtain its turn (LLM call, human input,
//! or relay), append, notify the sink, repeat. The emitter call and the
//! human-input wait are the only suspension points.

use std::sync::Arc;
use std::time::Duration;

use roundtable_chat::{
    next_speakers, FirstCandidate, Role, RoleKind, Roster, SpeakerSelector, TerminationPolicy,
    Transcript, TransitionTable,
};
use roundtable_hitl::{InputRequest, InputResponse, InputStrategy};

use crate::conversation::{Conversation, StopReason};
use crate::emitter::MessageEmitter;
use crate::error::{DriverError, Result};
use crate::sink::{DisplaySink, NullSink};

/// Drives one conversation at a time over a fixed topology
///
/// The driver owns no conversation state; every [`run`](Self::run) creates a
/// fresh [`Conversation`], so a single driver can be reused and multiple
/// drivers can run concurrently without sharing anything mutable.
pub struct ConversationDriver {
    roster: Roster,
    table: TransitionTable,
    policy: TerminationPolicy,
    emitter: Option<Arc<dyn MessageEmitter>>,
    selector: Arc<dyn SpeakerSelector>,
    sink: Arc<dyn DisplaySink>,
    input: Option<Arc<dyn InputStrategy>>,
    input_timeout: Duration,
}

impl ConversationDriver {
    /// Create a new driver builder
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Run a conversation for the given task
    ///
    /// Appends the task as a message from the table's initial role, then
    /// loops turns until a terminal condition holds. Returns the completed
    /// conversation; check [`Conversation::stop_reason`] to see why it
    /// ended and [`Conversation::is_complete`] for ceiling exhaustion.
    pub async fn run(&self, task: &str) -> Result<Conversation> {
        let mut conversation = Conversation::new();
        tracing::info!("Conversation {} started", conversation.id());

        let initial = self.table.initial_role().to_string();
        let msg = conversation.begin(&initial, task)?.clone();
        self.sink.on_message(&msg);

        loop {
            let last = conversation
                .transcript()
                .last()
                .cloned()
                .ok_or(DriverError::TaskNotSubmitted)?;

            // Termination check runs before the scheduler is consulted
            if conversation.rounds() >= self.policy.max_rounds() {
                conversation.close(StopReason::RoundLimitReached);
                break;
            }
            if self.policy.contains_token(&last.content) {
                conversation.close(StopReason::TerminationToken);
                break;
            }

            let candidates = next_speakers(conversation.transcript(), &self.table);
            if candidates.is_empty() {
                conversation.close(StopReason::NoAllowedSpeaker);
                break;
            }

            let speaker = self
                .selector
                .select(conversation.transcript(), &candidates)
                .ok_or_else(|| DriverError::config("speaker selector returned no candidate"))?
                .to_string();

            let role = self
                .roster
                .get(&speaker)
                .ok_or_else(|| DriverError::config(format!("Undeclared speaker: {}", speaker)))?
                .clone();

            tracing::debug!(
                "Round {}: {} speaks next",
                conversation.rounds() + 1,
                role.name
            );

            let content = match &role.kind {
                RoleKind::Generating { .. } => {
                    match self.emit_with_retry(&role, conversation.transcript()).await {
                        Ok(content) => content,
                        Err(e) => {
                            tracing::warn!(
                                "Emitter failed twice for {}, ending conversation: {}",
                                role.name,
                                e
                            );
                            conversation.close(StopReason::EmitterFailed);
                            break;
                        }
                    }
                }

                RoleKind::HumanInput => {
                    let strategy = self.input.as_ref().ok_or_else(|| {
                        DriverError::config(format!(
                            "Role {} needs human input but no strategy is configured",
                            role.name
                        ))
                    })?;

                    conversation.set_awaiting_input(true);
                    let request = InputRequest::new(&role.name, &last.content)
                        .with_timeout(self.input_timeout);
                    let response = strategy.request_input(request).await?;
                    conversation.set_awaiting_input(false);

                    match response {
                        InputResponse::Submitted { content } => content,
                        InputResponse::Timeout | InputResponse::Cancelled => {
                            tracing::info!(
                                "No input for {}, ending conversation",
                                role.name
                            );
                            conversation.close(StopReason::InputUnavailable);
                            break;
                        }
                    }
                }

                RoleKind::PureRelay => last.content.clone(),
            };

            let msg = conversation.append(&role.name, content)?.clone();
            self.sink.on_message(&msg);
        }

        tracing::info!(
            "Conversation {} finished: {:?}, {} messages",
            conversation.id(),
            conversation.stop_reason(),
            conversation.transcript().len()
        );

        Ok(conversation)
    }

    /// Invoke the emitter, retrying once with the same context
    async fn emit_with_retry(&self, role: &Role, transcript: &Transcript) -> Result<String> {
        let emitter = self.emitter.as_ref().ok_or_else(|| {
            DriverError::config(format!(
                "Role {} generates but no emitter is configured",
                role.name
            ))
        })?;

        match emitter.emit(role, transcript).await {
            Ok(content) => Ok(content),
            Err(first) => {
                tracing::warn!("Emitter failed for {}, retrying once: {}", role.name, first);
                emitter.emit(role, transcript).await
            }
        }
    }
}

/// Builder for constructing a [`ConversationDriver`]
///
/// All topology validation happens in [`build`](Self::build): a driver that
/// builds successfully can never hit a configuration error mid-conversation.
pub struct DriverBuilder {
    roster: Option<Roster>,
    table: Option<TransitionTable>,
    policy: TerminationPolicy,
    emitter: Option<Arc<dyn MessageEmitter>>,
    selector: Arc<dyn SpeakerSelector>,
    sink: Arc<dyn DisplaySink>,
    input: Option<Arc<dyn InputStrategy>>,
    input_timeout: Duration,
}

impl DriverBuilder {
    /// Create a new driver builder
    pub fn new() -> Self {
        Self {
            roster: None,
            table: None,
            policy: TerminationPolicy::default(),
            emitter: None,
            selector: Arc::new(FirstCandidate),
            sink: Arc::new(NullSink),
            input: None,
            input_timeout: Duration::from_secs(300),
        }
    }

    /// Set the roster
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Set the transition table
    pub fn table(mut self, table: TransitionTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Set roster and table from a team preset
    pub fn team(mut self, team: roundtable_chat::Team) -> Self {
        self.roster = Some(team.roster);
        self.table = Some(team.table);
        self
    }

    /// Set the termination policy
    pub fn policy(mut self, policy: TerminationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the message emitter for generating roles
    pub fn emitter<E: MessageEmitter + 'static>(mut self, emitter: E) -> Self {
        self.emitter = Some(Arc::new(emitter));
        self
    }

    /// Set a shared message emitter
    pub fn emitter_arc(mut self, emitter: Arc<dyn MessageEmitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    /// Set the speaker selector (default: first candidate)
    pub fn selector<S: SpeakerSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Arc::new(selector);
        self
    }

    /// Set the display sink (default: discard)
    pub fn sink<S: DisplaySink + 'static>(mut self, sink: S) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Set a shared display sink
    pub fn sink_arc(mut self, sink: Arc<dyn DisplaySink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set the human-input strategy
    pub fn input<I: InputStrategy + 'static>(mut self, input: I) -> Self {
        self.input = Some(Arc::new(input));
        self
    }

    /// Set a shared human-input strategy
    pub fn input_arc(mut self, input: Arc<dyn InputStrategy>) -> Self {
        self.input = Some(input);
        self
    }

    /// Set how long to wait for human input
    pub fn input_timeout(mut self, timeout: Duration) -> Self {
        self.input_timeout = timeout;
        self
    }

    /// Validate the configuration and build the driver
    pub fn build(self) -> Result<ConversationDriver> {
        let roster = self
            .roster
            .ok_or_else(|| DriverError::config("Roster not set"))?;

        let table = self
            .table
            .ok_or_else(|| DriverError::config("Transition table not set"))?;

        if !roster.declares(table.initial_role()) {
            return Err(DriverError::config(format!(
                "Initial role {} is not declared in the roster",
                table.initial_role()
            )));
        }

        let has_generating = roster.roles().iter().any(|r| r.kind.requires_generation());
        if has_generating && self.emitter.is_none() {
            return Err(DriverError::config(
                "Roster has generating roles but no emitter is configured",
            ));
        }

        if roster.has_human_input() && self.input.is_none() {
            return Err(DriverError::config(
                "Roster has human-input roles but no input strategy is configured",
            ));
        }

        Ok(ConversationDriver {
            roster,
            table,
            policy: self.policy,
            emitter: self.emitter,
            selector: self.selector,
            sink: self.sink,
            input: self.input,
            input_timeout: self.input_timeout,
        })
    }
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::ScriptedEmitter;
    use roundtable_chat::TransitionTableBuilder;

    fn roster() -> Roster {
        Roster::new(vec![
            Role::generating("Admin", "openai", "gpt-4-turbo"),
            Role::generating("Planner", "openai", "gpt-4-turbo"),
        ])
        .unwrap()
    }

    fn table(builder: TransitionTableBuilder, roster: &Roster) -> TransitionTable {
        builder.build(roster).unwrap()
    }

    #[test]
    fn test_builder_requires_roster() {
        let result = ConversationDriver::builder().build();
        assert!(matches!(result, Err(DriverError::Configuration(_))));
    }

    #[test]
    fn test_builder_requires_emitter_for_generating_roles() {
        let roster = roster();
        let table = table(
            TransitionTable::builder("Admin").allow("Admin", ["Planner"]),
            &roster,
        );

        let result = ConversationDriver::builder()
            .roster(roster)
            .table(table)
            .build();

        assert!(matches!(result, Err(DriverError::Configuration(_))));
    }

    #[test]
    fn test_builder_requires_input_for_human_roles() {
        let roster = Roster::new(vec![
            Role::human("Admin"),
            Role::generating("Planner", "openai", "gpt-4-turbo"),
        ])
        .unwrap();
        let table = table(
            TransitionTable::builder("Admin").allow("Admin", ["Planner"]),
            &roster,
        );

        let result = ConversationDriver::builder()
            .roster(roster)
            .table(table)
            .emitter(ScriptedEmitter::new())
            .build();

        assert!(matches!(result, Err(DriverError::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_mismatched_initial_role() {
        let admin_only = Roster::new(vec![Role::generating("Admin", "openai", "gpt-4-turbo")])
            .unwrap();
        let table = table(
            TransitionTable::builder("Admin").allow("Admin", Vec::<String>::new()),
            &admin_only,
        );

        // A different roster that doesn't declare the table's initial role
        let other = Roster::new(vec![Role::generating("Planner", "openai", "gpt-4-turbo")])
            .unwrap();

        let result = ConversationDriver::builder()
            .roster(other)
            .table(table)
            .emitter(ScriptedEmitter::new())
            .build();

        assert!(matches!(result, Err(DriverError::Configuration(_))));
    }

    #[test]
    fn test_builder_accepts_relay_only_roster_without_emitter() {
        let roster = Roster::new(vec![Role::relay("Admin"), Role::relay("Planner")]).unwrap();
        let table = table(
            TransitionTable::builder("Admin").allow("Admin", ["Planner"]),
            &roster,
        );

        let result = ConversationDriver::builder()
            .roster(roster)
            .table(table)
            .build();

        assert!(result.is_ok());
    }
}
