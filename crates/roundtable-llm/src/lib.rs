//! LLM Provider Abstraction
//!
//! A unified interface for the language-model backends that produce the
//! turns of generating roles. Providers take a rendered message list and
//! return a single complete turn; retries for transient HTTP failures are
//! handled inside each provider.
//!
//! # Example
//!
//! ```no_run
//! use roundtable_llm::{LLMProvider, Message, OpenAIProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAIProvider::new("your-api-key", "gpt-4-turbo")?;
//!
//!     let messages = vec![Message::user("Write a one-line market summary.")];
//!     let response = provider.send_message(messages).await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod provider;
pub mod types;

// Provider implementations
pub mod anthropic;
pub mod openai;

// Re-exports
pub use error::{LLMError, Result};
pub use provider::LLMProvider;
pub use types::{Message, MessageRole, Response, TokenUsage};

pub use anthropic::AnthropicProvider;
pub use openai::OpenAIProvider;

/// Create a provider from configuration
pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: &str,
) -> Result<Box<dyn LLMProvider>> {
    match provider_name.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAIProvider::new(api_key, model)?)),
        "anthropic" => Ok(Box::new(AnthropicProvider::new(api_key, model)?)),
        _ => Err(LLMError::UnsupportedProvider(provider_name.to_string())),
    }
}
