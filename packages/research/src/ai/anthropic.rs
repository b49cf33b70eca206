//! Anthropic implementation of the AI trait.

use async_trait::async_trait;

use anthropic_client::{AnthropicClient, Message, MessageRequest};

use crate::error::{ResearchError, Result};

use super::{CompletionRequest, AI};

/// Anthropic-backed AI implementation.
#[derive(Clone)]
pub struct AnthropicAI {
    client: AnthropicClient,
    model: String,
}

impl AnthropicAI {
    /// Create an adapter over the given client and model.
    pub fn new(client: AnthropicClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Get the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AI for AnthropicAI {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let mut message_request = MessageRequest::new(&self.model, request.max_tokens)
            .message(Message::user(request.prompt));

        if let Some(system) = request.system {
            message_request = message_request.system(system);
        }
        if let Some(temperature) = request.temperature {
            message_request = message_request.temperature(temperature);
        }

        let response = self
            .client
            .create_message(message_request)
            .await
            .map_err(|e| ResearchError::Model(Box::new(e)))?;

        Ok(response.text)
    }
}
