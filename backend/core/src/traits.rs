use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Classification, ImageUpload};

/// Trait for generative-text providers used by the identifier.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Trait for image-classification backends used by `/recognize`.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    fn name(&self) -> &str;

    /// Classify an already validated upload and return the top label.
    async fn classify(&self, image: &ImageUpload) -> Result<Classification>;
}

/// An image sent alongside a prompt, base64-encoded.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data_base64: String,
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub prompt: String,
    pub image: Option<InlineImage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmRequest {
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            image: None,
            max_tokens: 256,
            temperature: 0.4,
        }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
