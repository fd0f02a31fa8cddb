//! OpenAI LLM service adapter
//!
//! Implements the CompletionPort for OpenAI's chat completions API using
//! `json_schema` structured output. Any OpenAI-compatible endpoint can be
//! targeted by overriding the base URL.

use crate::domain::schemas::ResponseSchema;
use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionPort, LlmConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    api_base: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: &'a serde_json::Value,
    strict: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

impl OpenAIService {
    /// Create a new OpenAI service with the given API key
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENAI_API_BASE.to_string())
    }

    /// Create a service against an OpenAI-compatible endpoint
    pub fn with_base_url(api_key: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn build_request<'a>(
        prompt: &str,
        schema: &'a ResponseSchema,
        config: &'a LlmConfig,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
                refusal: None,
            }],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema.name,
                    schema: &schema.schema,
                    strict: true,
                },
            },
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Pull the structured payload out of a completion response
    fn extract_content(response: ChatCompletionResponse) -> Result<String> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Provider("No completion choices returned".to_string()))?;

        if let Some(refusal) = choice.message.refusal {
            return Err(AppError::Provider(format!("Model refused: {}", refusal)));
        }

        if choice.finish_reason.as_deref() == Some("length") {
            return Err(AppError::Provider(
                "Completion was truncated before the response was complete".to_string(),
            ));
        }

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(AppError::Provider(
                "Completion returned no content".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CompletionPort for OpenAIService {
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
        config: &LlmConfig,
    ) -> Result<String> {
        if !self.is_configured() {
            return Err(AppError::Provider(
                "OpenAI API key is not configured".to_string(),
            ));
        }

        let request_body = Self::build_request(prompt, schema, config);

        log::info!(
            "Calling OpenAI chat completion with model: {}, schema: {}",
            config.model,
            schema.name
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .timeout(config.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Chat completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Chat completion failed ({}): {}",
                status, error_text
            )));
        }

        let completion_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::Provider(format!("Failed to parse completion response: {}", e))
        })?;

        let model = completion_response.model.clone();
        let content = Self::extract_content(completion_response)?;
        log::info!(
            "OpenAI completion successful ({}), generated {} characters",
            model,
            content.len()
        );

        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
