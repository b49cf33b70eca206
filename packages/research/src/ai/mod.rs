//! LLM seam for the research pipeline.
//!
//! The model is treated as an unreliable external service: implementations
//! return raw text and every reply is schema-validated downstream before
//! anything trusts it.

mod anthropic;

pub use anthropic::AnthropicAI;

use async_trait::async_trait;

use crate::error::Result;

/// One completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt, if any.
    pub system: Option<String>,

    /// User prompt.
    pub prompt: String,

    /// Token budget for the reply.
    pub max_tokens: u32,

    /// Sampling temperature; provider default when unset.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a request with the given prompt and token budget.
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            max_tokens,
            temperature: None,
        }
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// LLM provider abstraction.
///
/// Implementations wrap a specific provider and return the raw response
/// text; provider failures surface as [`crate::error::ResearchError::Model`].
#[async_trait]
pub trait AI: Send + Sync {
    /// Run one completion and return the raw response text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
