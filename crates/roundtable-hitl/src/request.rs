//! Input request and response types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A request for a human to supply a role's turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    /// Unique identifier for tracking
    pub id: String,

    /// Name of the role whose turn is being supplied
    pub role: String,

    /// What the human is responding to (usually the last message)
    pub prompt: String,

    /// How long to wait for input
    #[serde(with = "duration_serde")]
    pub timeout: Duration,

    /// When the request was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl InputRequest {
    /// Create a new input request
    pub fn new(role: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: role.into(),
            prompt: prompt.into(),
            timeout: Duration::from_secs(300),
            created_at: chrono::Utc::now(),
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Outcome of an input request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResponse {
    /// The human supplied message content
    Submitted {
        /// The message text
        content: String,
    },

    /// No input arrived within the timeout
    Timeout,

    /// The request was cancelled before input arrived
    Cancelled,
}

impl InputResponse {
    /// Extract the submitted content, if any
    pub fn content(&self) -> Option<&str> {
        match self {
            InputResponse::Submitted { content } => Some(content),
            _ => None,
        }
    }

    /// Whether input was actually supplied
    pub fn is_submitted(&self) -> bool {
        matches!(self, InputResponse::Submitted { .. })
    }
}

// Helper module for Duration serialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = InputRequest::new("Admin", "Planner: Plan ready");
        assert_eq!(req.role, "Admin");
        assert!(!req.id.is_empty());
    }

    #[test]
    fn test_response_checks() {
        let submitted = InputResponse::Submitted {
            content: "Looks good".to_string(),
        };
        assert!(submitted.is_submitted());
        assert_eq!(submitted.content(), Some("Looks good"));

        assert!(!InputResponse::Timeout.is_submitted());
        assert!(InputResponse::Cancelled.content().is_none());
    }

    #[test]
    fn test_request_serialization() {
        let req = InputRequest::new("Admin", "prompt").with_timeout(Duration::from_secs(10));

        let json = serde_json::to_string(&req).unwrap();
        let deserialized: InputRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.role, "Admin");
        assert_eq!(deserialized.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_response_serialization() {
        let response = InputResponse::Submitted {
            content: "ok".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        let deserialized: InputResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, response);
    }
}
