//! Pure OpenAI REST API client
//!
//! A minimal client for the OpenAI chat completions API with no menu-specific
//! logic. Every request runs under a bounded timeout so callers can tell a
//! hung provider apart from a failed one.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::new(api_key);
//!
//! let response = client
//!     .chat_completion(ChatRequest::new("gpt-4o-mini").message(Message::user("Hello!")))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout (default: 60s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get the first choice back.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        if self.api_key.trim().is_empty() {
            return Err(OpenAIError::Config("API key is empty".into()));
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(OpenAIError::Api(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: types::ChatResponseRaw = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OpenAIError::Timeout(self.timeout)
            } else {
                OpenAIError::Parse(e.to_string())
            }
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OpenAIError::Api("No response from OpenAI".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> OpenAIError {
        if e.is_timeout() {
            warn!(timeout = ?self.timeout, "OpenAI request timed out");
            OpenAIError::Timeout(self.timeout)
        } else {
            warn!(error = %e, "OpenAI request failed");
            OpenAIError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = OpenAIClient::new("sk-secret");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_blank_api_key_is_config_error() {
        let client = OpenAIClient::new("  ").with_base_url("http://127.0.0.1:9");

        let err = client
            .chat_completion(ChatRequest::new("gpt-4o-mini").message(Message::user("hi")))
            .await
            .unwrap_err();

        assert!(matches!(err, OpenAIError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 on localhost is the discard service; nothing listens in CI.
        let client = OpenAIClient::new("sk-test")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));

        let err = client
            .chat_completion(ChatRequest::new("gpt-4o-mini").message(Message::user("hi")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OpenAIError::Network(_) | OpenAIError::Timeout(_)
        ));
    }
}
