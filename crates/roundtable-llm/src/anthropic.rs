//! Anthropic (Claude) provider implementation

use async_trait::async_trait;
use backoff::{future::retry, ExponentialBackoff};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    error::{LLMError, Result},
    provider::LLMProvider,
    types::{Message, MessageRole, Response, TokenUsage},
};

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
// Stable API version; works with all Claude 4.x models
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic (Claude) API provider
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key
    /// * `model` - Model to use, e.g. "claude-opus-4-5" or "claude-sonnet-4-5"
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LLMError::config_error("Anthropic API key cannot be empty"));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            timeout: Duration::from_secs(60),
        })
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Convert our messages to Anthropic format
    fn format_messages(&self, messages: &[Message]) -> (Option<String>, Vec<AnthropicMessage>) {
        // Anthropic takes the system prompt as a separate parameter
        let system = messages
            .iter()
            .find(|m| m.role == MessageRole::System)
            .map(|m| m.content.clone());

        let messages: Vec<AnthropicMessage> = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|msg| AnthropicMessage {
                role: match msg.role {
                    MessageRole::User => "user".to_string(),
                    MessageRole::Assistant => "assistant".to_string(),
                    MessageRole::System => unreachable!(), // filtered out
                },
                content: msg.content.clone(),
            })
            .collect();

        (system, messages)
    }

    /// Make a retryable API request
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        request_body: &AnthropicRequest,
    ) -> Result<T> {
        let operation = || async {
            let response = self
                .client
                .post(format!("{}/messages", ANTHROPIC_API_BASE))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("Content-Type", "application/json")
                .timeout(self.timeout)
                .json(request_body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        backoff::Error::Permanent(LLMError::Timeout)
                    } else {
                        backoff::Error::Transient {
                            err: LLMError::HttpError(e),
                            retry_after: None,
                        }
                    }
                })?;

            let status = response.status();

            // Handle rate limiting
            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs: Option<u64> = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());

                return Err(backoff::Error::Transient {
                    err: LLMError::RateLimitExceeded(retry_after_secs),
                    retry_after: retry_after_secs.map(Duration::from_secs),
                });
            }

            // Handle server errors (retryable)
            if status.is_server_error() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(backoff::Error::Transient {
                    err: LLMError::api_error(format!("Server error: {}", error_text)),
                    retry_after: None,
                });
            }

            // Handle client errors (not retryable)
            if status.is_client_error() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(backoff::Error::Permanent(LLMError::api_error(format!(
                    "Client error ({}): {}",
                    status, error_text
                ))));
            }

            // Parse successful response
            response
                .json::<T>()
                .await
                .map_err(|e| backoff::Error::Permanent(LLMError::parse_error(e.to_string())))
        };

        let backoff_config = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff_config, operation).await
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn send_message(&self, messages: Vec<Message>) -> Result<Response> {
        let (system, formatted_messages) = self.format_messages(&messages);

        let request = AnthropicRequest {
            model: self.model.clone(),
            messages: formatted_messages,
            system,
            max_tokens: 4096, // Required by Anthropic
            temperature: None,
        };

        let response: AnthropicResponse = self.make_request(&request).await?;

        let content = response
            .content
            .first()
            .ok_or_else(|| LLMError::parse_error("No content in response"))?;

        Ok(Response {
            content: content.text.clone(),
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens + u.output_tokens,
            }),
            finish_reason: response.stop_reason,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

// Anthropic API types

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<AnthropicContent>,
    usage: Option<AnthropicUsage>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = AnthropicProvider::new("test-key", "claude-sonnet-4-5");
        assert!(provider.is_ok());

        let provider = provider.unwrap();
        assert_eq!(provider.model(), "claude-sonnet-4-5");
        assert_eq!(provider.name(), "anthropic");
    }

    #[test]
    fn test_empty_api_key() {
        let provider = AnthropicProvider::new("", "claude-sonnet-4-5");
        assert!(provider.is_err());
    }

    #[test]
    fn test_system_message_separated() {
        let provider = AnthropicProvider::new("test-key", "claude-sonnet-4-5").unwrap();
        let messages = vec![
            Message::system("You are the Writer"),
            Message::user("Hello"),
            Message::assistant("Hi"),
        ];

        let (system, formatted) = provider.format_messages(&messages);
        assert_eq!(system.unwrap(), "You are the Writer");
        assert_eq!(formatted.len(), 2);
        assert_eq!(formatted[0].role, "user");
        assert_eq!(formatted[1].role, "assistant");
    }
}
