//! Mock input strategy for testing

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{InputRequest, InputResponse, InputStrategy, Result};

/// Mock input strategy for automated testing
///
/// Allows configuring behavior for tests:
/// - Feed scripted lines in order
/// - Always time out
/// - Always cancel
pub struct MockInput {
    /// Behavior mode
    mode: MockMode,
    /// Call counter
    call_count: Arc<AtomicUsize>,
}

/// Mock behavior modes
enum MockMode {
    /// Pop scripted lines in order; time out when exhausted
    Scripted(Mutex<VecDeque<String>>),

    /// Always time out
    AlwaysTimeout,

    /// Always cancel
    AlwaysCancel,
}

impl MockInput {
    /// Create a mock that feeds scripted lines in order
    pub fn scripted<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: MockMode::Scripted(Mutex::new(
                lines.into_iter().map(Into::into).collect(),
            )),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that always times out
    pub fn always_timeout() -> Self {
        Self {
            mode: MockMode::AlwaysTimeout,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that always cancels
    pub fn always_cancel() -> Self {
        Self {
            mode: MockMode::AlwaysCancel,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get number of times this mock was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InputStrategy for MockInput {
    async fn request_input(&self, _request: InputRequest) -> Result<InputResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.mode {
            MockMode::Scripted(lines) => {
                let next = lines.lock().expect("mock lock poisoned").pop_front();
                match next {
                    Some(content) => Ok(InputResponse::Submitted { content }),
                    None => Ok(InputResponse::Timeout),
                }
            }

            MockMode::AlwaysTimeout => Ok(InputResponse::Timeout),

            MockMode::AlwaysCancel => Ok(InputResponse::Cancelled),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_lines_in_order() {
        let strategy = MockInput::scripted(["first", "second"]);
        let req = InputRequest::new("Admin", "prompt");

        let r1 = strategy.request_input(req.clone()).await.unwrap();
        assert_eq!(r1.content(), Some("first"));

        let r2 = strategy.request_input(req.clone()).await.unwrap();
        assert_eq!(r2.content(), Some("second"));

        // Exhausted script times out
        let r3 = strategy.request_input(req).await.unwrap();
        assert_eq!(r3, InputResponse::Timeout);

        assert_eq!(strategy.call_count(), 3);
    }

    #[tokio::test]
    async fn test_always_timeout() {
        let strategy = MockInput::always_timeout();
        let req = InputRequest::new("Admin", "prompt");

        let response = strategy.request_input(req).await.unwrap();
        assert_eq!(response, InputResponse::Timeout);
    }

    #[tokio::test]
    async fn test_always_cancel() {
        let strategy = MockInput::always_cancel();
        let req = InputRequest::new("Admin", "prompt");

        let response = strategy.request_input(req).await.unwrap();
        assert_eq!(response, InputResponse::Cancelled);
    }
}
