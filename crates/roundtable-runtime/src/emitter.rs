//! Message emitters for generating roles
//!
//! An emitter produces the content of a generating role's turn from the
//! transcript. [`LlmEmitter`] renders the shared transcript into a
//! per-role provider conversation and calls the role's LLM;
//! [`ScriptedEmitter`] feeds canned turns for tests and demos.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use roundtable_chat::{Role, RoleKind, Roster, Transcript};
use roundtable_llm::{create_provider, LLMProvider, Message};

use crate::error::{DriverError, Result};

/// Produces the content of a role's turn given the transcript
#[async_trait]
pub trait MessageEmitter: Send + Sync {
    /// Generate the next message for `role`
    async fn emit(&self, role: &Role, transcript: &Transcript) -> Result<String>;

    /// Emitter name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Emitter backed by per-role LLM providers
///
/// Each generating role gets its own provider, matching the per-agent model
/// configuration of the roles. The shared transcript is rendered from the
/// role's perspective: its own messages become assistant turns, everyone
/// else's become user turns prefixed with the speaker's name.
pub struct LlmEmitter {
    providers: HashMap<String, Arc<dyn LLMProvider>>,
}

impl LlmEmitter {
    /// Create an emitter with no providers registered
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider for a role
    pub fn with_provider(
        mut self,
        role: impl Into<String>,
        provider: Arc<dyn LLMProvider>,
    ) -> Self {
        self.providers.insert(role.into(), provider);
        self
    }

    /// Build providers for every generating role in a roster
    ///
    /// API keys are looked up by the provider name each role declares.
    pub fn for_roster(
        roster: &Roster,
        openai_key: Option<&str>,
        anthropic_key: Option<&str>,
    ) -> Result<Self> {
        let mut emitter = Self::new();

        for role in roster.roles() {
            if let RoleKind::Generating { provider, model } = &role.kind {
                let key = match provider.as_str() {
                    "openai" => openai_key.ok_or_else(|| {
                        DriverError::config(format!("OpenAI key not set (role {})", role.name))
                    })?,
                    "anthropic" => anthropic_key.ok_or_else(|| {
                        DriverError::config(format!("Anthropic key not set (role {})", role.name))
                    })?,
                    other => {
                        return Err(DriverError::config(format!(
                            "Unknown provider {} (role {})",
                            other, role.name
                        )))
                    }
                };

                let provider = create_provider(provider, key, model)?;
                emitter.providers.insert(role.name.clone(), provider.into());
            }
        }

        Ok(emitter)
    }

    /// Number of registered providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Render the shared transcript into a provider conversation for `role`
    fn render(role: &Role, transcript: &Transcript) -> Vec<Message> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);

        if !role.system_prompt.is_empty() {
            messages.push(Message::system(&role.system_prompt));
        }

        for msg in transcript.messages() {
            if msg.sender == role.name {
                messages.push(Message::assistant(&msg.content));
            } else {
                messages.push(Message::user(format!("{}: {}", msg.sender, msg.content)));
            }
        }

        messages
    }
}

impl Default for LlmEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageEmitter for LlmEmitter {
    async fn emit(&self, role: &Role, transcript: &Transcript) -> Result<String> {
        let provider = self
            .providers
            .get(&role.name)
            .ok_or_else(|| {
                DriverError::config(format!("No provider registered for role {}", role.name))
            })?;

        let messages = Self::render(role, transcript);
        tracing::debug!(
            "Requesting turn for {} from {} ({} messages)",
            role.name,
            provider.name(),
            messages.len()
        );

        let response = provider.send_message(messages).await?;
        Ok(response.content)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

/// A scripted turn for one role
enum ScriptedTurn {
    /// Return this content
    Say(String),
    /// Fail with this message
    Fail(String),
}

/// Emitter that replays scripted turns per role
///
/// Turns are consumed in order per role; an exhausted script fails the
/// emit, which lets tests exercise the driver's failure handling.
pub struct ScriptedEmitter {
    turns: Mutex<HashMap<String, VecDeque<ScriptedTurn>>>,
    call_count: AtomicUsize,
}

impl ScriptedEmitter {
    /// Create an empty scripted emitter
    pub fn new() -> Self {
        Self {
            turns: Mutex::new(HashMap::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Queue a turn for a role
    pub fn say(self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.turns
            .lock()
            .expect("script lock poisoned")
            .entry(role.into())
            .or_default()
            .push_back(ScriptedTurn::Say(content.into()));
        self
    }

    /// Queue a failing turn for a role
    pub fn fail(self, role: impl Into<String>, message: impl Into<String>) -> Self {
        self.turns
            .lock()
            .expect("script lock poisoned")
            .entry(role.into())
            .or_default()
            .push_back(ScriptedTurn::Fail(message.into()));
        self
    }

    /// Number of times `emit` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageEmitter for ScriptedEmitter {
    async fn emit(&self, role: &Role, _transcript: &Transcript) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let next = self
            .turns
            .lock()
            .expect("script lock poisoned")
            .get_mut(&role.name)
            .and_then(VecDeque::pop_front);

        match next {
            Some(ScriptedTurn::Say(content)) => Ok(content),
            Some(ScriptedTurn::Fail(message)) => Err(DriverError::emitter(&role.name, message)),
            None => Err(DriverError::emitter(&role.name, "script exhausted")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
