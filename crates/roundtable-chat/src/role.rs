//! Conversation roles and the roster that declares them

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};

/// How a role produces its turn
///
/// A closed set: the driver branches on this tag explicitly instead of
/// dispatching through overridable agent behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleKind {
    /// Turn content is produced by an LLM call
    Generating {
        /// Provider name (openai, anthropic)
        provider: String,
        /// Model identifier
        model: String,
    },

    /// Turn content is supplied by a human; the driver suspends until it
    /// arrives
    HumanInput,

    /// Turn content is the previous message, forwarded verbatim
    PureRelay,
}

impl RoleKind {
    /// Whether this role needs external generation (an LLM call)
    pub fn requires_generation(&self) -> bool {
        matches!(self, RoleKind::Generating { .. })
    }

    /// Whether this role suspends the conversation for human input
    pub fn is_human_input(&self) -> bool {
        matches!(self, RoleKind::HumanInput)
    }
}

/// A named participant in the conversation
///
/// Roles are fixed at configuration time; nothing about a role changes while
/// a conversation runs. Handoff permissions live in the
/// [`TransitionTable`](crate::TransitionTable), not on the role itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Role name, also used as the message sender tag
    pub name: String,

    /// One-line description of what the role does
    #[serde(default)]
    pub description: String,

    /// System prompt handed to the LLM for generating roles
    #[serde(default)]
    pub system_prompt: String,

    /// How the role produces its turn
    #[serde(flatten)]
    pub kind: RoleKind,
}

impl Role {
    /// Create a generating role backed by an LLM
    pub fn generating(
        name: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            system_prompt: String::new(),
            kind: RoleKind::Generating {
                provider: provider.into(),
                model: model.into(),
            },
        }
    }

    /// Create a role whose turns come from a human
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            system_prompt: String::new(),
            kind: RoleKind::HumanInput,
        }
    }

    /// Create a role that relays the previous message verbatim
    pub fn relay(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            system_prompt: String::new(),
            kind: RoleKind::PureRelay,
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

/// The fixed set of roles participating in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    roles: Vec<Role>,
}

impl Roster {
    /// Create a roster, rejecting duplicates and empty declarations
    pub fn new(roles: Vec<Role>) -> Result<Self> {
        if roles.is_empty() {
            return Err(TopologyError::EmptyRoster);
        }

        for (i, role) in roles.iter().enumerate() {
            if roles[..i].iter().any(|r| r.name == role.name) {
                return Err(TopologyError::DuplicateRole(role.name.clone()));
            }
        }

        tracing::debug!("Roster declared with {} roles", roles.len());
        Ok(Self { roles })
    }

    /// Look up a role by name
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Whether the roster declares a role with this name
    pub fn declares(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All declared roles, in declaration order
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Declared role names, in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    /// Number of declared roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the roster is empty (never true for a constructed roster)
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Whether any role suspends for human input
    pub fn has_human_input(&self) -> bool {
        self.roles.iter().any(|r| r.kind.is_human_input())
    }
}
