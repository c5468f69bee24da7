//! OpenAI implementation of the MenuExtractor trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use menu_extraction::ai::OpenAIExtractor;
//! use openai_client::OpenAIClient;
//!
//! let extractor = OpenAIExtractor::new(OpenAIClient::new(api_key)).with_model("gpt-4o-mini");
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::pipeline::prompts::{format_menu_prompt, SYSTEM_PROMPT};
use crate::traits::ai::{ExtractionRequest, MenuExtractor};

/// Default extraction model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Menu extractor backed by the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAIExtractor {
    client: OpenAIClient,
    model: String,
}

impl OpenAIExtractor {
    /// Create an extractor using the default model.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl MenuExtractor for OpenAIExtractor {
    async fn extract(&self, request: &ExtractionRequest<'_>) -> Result<String> {
        let date = request.date.format("%Y-%m-%d").to_string();
        let prompt = format_menu_prompt(request.text, request.source_url, &date);

        let chat = ChatRequest::new(&self.model)
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user(prompt))
            .temperature(0.0);

        let response = self.client.chat_completion(chat).await.map_err(|e| match e {
            OpenAIError::Timeout(elapsed) => ExtractionError::Timeout(elapsed),
            other => ExtractionError::AI(Box::new(other)),
        })?;

        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Menu extraction completed"
            );
        }

        Ok(response.content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
