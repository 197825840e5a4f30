//! Channel-based input strategy for async/remote frontends

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tokio::time::timeout;

use crate::{InputError, InputRequest, InputResponse, InputStrategy, Result};

/// Channel input strategy
///
/// For frontends that collect input out of process:
/// - Web apps (input via HTTP endpoint)
/// - Chat bots (input via message)
/// - Queue systems (input via message queue)
///
/// Works by:
/// 1. Store the pending request and announce it to subscribers
/// 2. The frontend shows the prompt to a human
/// 3. The human answers via [`ChannelInput::submit`]
/// 4. The answer is delivered to the waiting conversation
pub struct ChannelInput {
    /// Pending input requests
    pending: Arc<DashMap<String, oneshot::Sender<InputResponse>>>,

    /// Announces new pending requests to frontends
    announce: broadcast::Sender<InputRequest>,
}

impl ChannelInput {
    /// Create a new channel input strategy
    pub fn new() -> Self {
        let (announce, _) = broadcast::channel(64);
        Self {
            pending: Arc::new(DashMap::new()),
            announce,
        }
    }

    /// Subscribe to pending request announcements
    ///
    /// Frontends use this to learn which request ids are awaiting input.
    pub fn subscribe(&self) -> broadcast::Receiver<InputRequest> {
        self.announce.subscribe()
    }

    /// Submit input for a pending request (called by the frontend)
    ///
    /// # Arguments
    /// * `request_id` - The input request ID
    /// * `content` - The human's message text
    ///
    /// # Returns
    /// Ok if the request was found and the content delivered
    pub fn submit(&self, request_id: &str, content: impl Into<String>) -> Result<()> {
        if let Some((_, sender)) = self.pending.remove(request_id) {
            // Ignore send error (receiver might be gone)
            let _ = sender.send(InputResponse::Submitted {
                content: content.into(),
            });
            Ok(())
        } else {
            Err(InputError::strategy(format!(
                "No pending request with ID: {}",
                request_id
            )))
        }
    }

    /// Cancel a pending request
    pub fn cancel(&self, request_id: &str) -> Result<()> {
        if let Some((_, sender)) = self.pending.remove(request_id) {
            let _ = sender.send(InputResponse::Cancelled);
            Ok(())
        } else {
            Err(InputError::strategy("Request not found"))
        }
    }

    /// Get count of pending requests
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for ChannelInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputStrategy for ChannelInput {
    async fn request_input(&self, request: InputRequest) -> Result<InputResponse> {
        let (tx, rx) = oneshot::channel();
        self.pending.insert(request.id.clone(), tx);

        // Announce to frontends (ignore if nobody listens yet)
        let _ = self.announce.send(request.clone());
        tracing::debug!(
            "Input request {} pending for role {}",
            request.id,
            request.role
        );

        match timeout(request.timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            // Sender dropped without a response
            Ok(Err(_)) => Ok(InputResponse::Cancelled),
            Err(_) => {
                self.pending.remove(&request.id);
                tracing::warn!("Input request {} timed out", request.id);
                Ok(InputResponse::Timeout)
            }
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_submit_delivers_content() {
        let strategy = Arc::new(ChannelInput::new());
        let mut announcements = strategy.subscribe();

        let request = InputRequest::new("Admin", "Planner: Plan ready")
            .with_timeout(Duration::from_secs(5));

        let waiting = {
            let strategy = Arc::clone(&strategy);
            tokio::spawn(async move { strategy.request_input(request).await })
        };

        // Frontend sees the announcement and answers
        let announced = announcements.recv().await.unwrap();
        assert_eq!(announced.role, "Admin");
        strategy.submit(&announced.id, "Looks good, TERMINATE").unwrap();

        let response = waiting.await.unwrap().unwrap();
        assert_eq!(response.content(), Some("Looks good, TERMINATE"));
        assert_eq!(strategy.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_timeout() {
        let strategy = ChannelInput::new();
        let request = InputRequest::new("Admin", "prompt").with_timeout(Duration::from_millis(20));

        let response = strategy.request_input(request).await.unwrap();
        assert_eq!(response, InputResponse::Timeout);
        assert_eq!(strategy.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel() {
        let strategy = Arc::new(ChannelInput::new());
        let mut announcements = strategy.subscribe();

        let request = InputRequest::new("Admin", "prompt").with_timeout(Duration::from_secs(5));

        let waiting = {
            let strategy = Arc::clone(&strategy);
            tokio::spawn(async move { strategy.request_input(request).await })
        };

        let announced = announcements.recv().await.unwrap();
        strategy.cancel(&announced.id).unwrap();

        let response = waiting.await.unwrap().unwrap();
        assert_eq!(response, InputResponse::Cancelled);
    }

    #[tokio::test]
    async fn test_submit_unknown_id() {
        let strategy = ChannelInput::new();
        assert!(strategy.submit("missing", "content").is_err());
    }
}
