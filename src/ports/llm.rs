/// LLM service port trait
///
/// Defines the interface for shape-constrained text completion.
/// Implementations: OpenAI (and OpenAI-compatible endpoints).
use crate::domain::schemas::ResponseSchema;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Configuration for LLM requests
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name (e.g., "gpt-4o")
    pub model: String,

    /// Temperature for generation (0.0 to 2.0)
    pub temperature: Option<f32>,

    /// Maximum tokens in response
    pub max_tokens: Option<u32>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: None,
            max_tokens: Some(500),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Port trait for completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Complete `prompt` with a response conforming to `schema`
    ///
    /// Returns the raw JSON text of the response. Decoding and value
    /// validation belong to the caller.
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
        config: &LlmConfig,
    ) -> Result<String>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is configured (has API key)
    fn is_configured(&self) -> bool;
}
