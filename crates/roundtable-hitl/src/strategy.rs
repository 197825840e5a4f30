//! Input strategy trait

use async_trait::async_trait;

use crate::{InputRequest, InputResponse, Result};

/// Trait for human-input strategies
///
/// Implementations define where a human role's turn comes from: the
/// console, a UI channel, a message queue, or a script in tests.
///
/// All strategies must be:
/// - Send + Sync (thread-safe)
/// - Testable (including in automated tests)
/// - Async (non-blocking for the rest of the process)
#[async_trait]
pub trait InputStrategy: Send + Sync {
    /// Request message content from a human
    ///
    /// # Arguments
    /// * `request` - The input request
    ///
    /// # Returns
    /// The input response (submitted, timeout, cancelled)
    async fn request_input(&self, request: InputRequest) -> Result<InputResponse>;

    /// Get the strategy name (for logging/debugging)
    fn name(&self) -> &str;
}
