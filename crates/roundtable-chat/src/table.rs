//! The transition table governing speaker handoffs
//!
//! A transition table maps each role to the ordered set of roles allowed to
//! speak after it. The table is validated against the roster when built and
//! is read-only for the lifetime of a conversation: a reference to an
//! undeclared role is rejected here, never discovered mid-conversation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};
use crate::role::Roster;

/// Validated mapping from a role to its permitted successors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionTable {
    /// The role that receives the initial task
    initial: String,

    /// Role name -> ordered permitted next speakers
    allowed: HashMap<String, Vec<String>>,
}

impl TransitionTable {
    /// Start building a table with the given initial role
    pub fn builder(initial: impl Into<String>) -> TransitionTableBuilder {
        TransitionTableBuilder {
            initial: initial.into(),
            allowed: Vec::new(),
        }
    }

    /// The role designated to receive the task
    pub fn initial_role(&self) -> &str {
        &self.initial
    }

    /// Ordered roles permitted to speak after `role`
    ///
    /// An absent key yields the empty slice, which signals termination to
    /// the scheduler.
    pub fn allowed_after(&self, role: &str) -> &[String] {
        self.allowed.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of table entries
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Whether the table has no entries (never true once built)
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// Builder collecting table entries before validation
#[derive(Debug, Clone)]
pub struct TransitionTableBuilder {
    initial: String,
    allowed: Vec<(String, Vec<String>)>,
}

impl TransitionTableBuilder {
    /// Allow `to` roles (in order) to speak after `from`
    pub fn allow<I, S>(mut self, from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed
            .push((from.into(), to.into_iter().map(Into::into).collect()));
        self
    }

    /// Validate every referenced role against the roster and build the table
    pub fn build(self, roster: &Roster) -> Result<TransitionTable> {
        if self.allowed.is_empty() {
            return Err(TopologyError::EmptyTable);
        }
        if !roster.declares(&self.initial) {
            return Err(TopologyError::UndeclaredInitialRole(self.initial));
        }

        let mut allowed: HashMap<String, Vec<String>> = HashMap::new();
        for (from, to) in self.allowed {
            if !roster.declares(&from) {
                return Err(TopologyError::UnknownRole(from));
            }
            for name in &to {
                if !roster.declares(name) {
                    return Err(TopologyError::UnknownRole(name.clone()));
                }
            }
            // Later entries for the same key extend the earlier ones
            let entry = allowed.entry(from).or_default();
            for name in to {
                if !entry.contains(&name) {
                    entry.push(name);
                }
            }
        }

        tracing::debug!(
            "Transition table built: {} entries, initial role {}",
            allowed.len(),
            self.initial
        );

        Ok(TransitionTable {
            initial: self.initial,
            allowed,
        })
    }
}
