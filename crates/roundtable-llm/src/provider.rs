//! LLM Provider trait definition

use async_trait::async_trait;

use crate::{Message, Response, Result};

/// Trait for LLM providers
///
/// Implementations provide a unified interface for different LLM services
/// like OpenAI, Anthropic, etc. A provider takes the rendered conversation
/// and returns one complete turn.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send a message list and wait for the complete response
    ///
    /// # Arguments
    /// * `messages` - Conversation history including the new message
    ///
    /// # Returns
    /// The complete response from the LLM
    ///
    /// # Example
    /// ```no_run
    /// use roundtable_llm::{LLMProvider, Message};
    ///
    /// async fn example(provider: &dyn LLMProvider) -> Result<(), Box<dyn std::error::Error>> {
    ///     let messages = vec![Message::user("Hello!")];
    ///     let response = provider.send_message(messages).await?;
    ///     println!("{}", response.content);
    ///     Ok(())
    /// }
    /// ```
    async fn send_message(&self, messages: Vec<Message>) -> Result<Response>;

    /// Get the model name/identifier
    fn model(&self) -> &str;

    /// Get the provider name
    fn name(&self) -> &str;
}
