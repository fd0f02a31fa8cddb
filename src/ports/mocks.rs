//! Mock implementations for testing

use crate::domain::schemas::ResponseSchema;
use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionPort, LlmConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Deterministic completion provider
///
/// Answers every request for a given schema with the same scripted payload,
/// or with a provider error when a failure is scripted for that schema.
/// Records the prompts it receives.
#[derive(Clone, Default)]
pub struct StubCompletion {
    responses: Arc<Mutex<HashMap<&'static str, String>>>,
    failures: Arc<Mutex<HashMap<&'static str, String>>>,
    prompts: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl StubCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, schema_name: &'static str, payload: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(schema_name, payload.to_string());
        self
    }

    pub fn with_failure(self, schema_name: &'static str, message: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(schema_name, message.to_string());
        self
    }

    /// Number of requests made for a schema
    pub fn calls(&self, schema_name: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == schema_name)
            .count()
    }

    pub fn prompts(&self) -> Vec<(&'static str, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionPort for StubCompletion {
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
        _config: &LlmConfig,
    ) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((schema.name, prompt.to_string()));

        if let Some(message) = self.failures.lock().unwrap().get(schema.name) {
            return Err(AppError::Provider(message.clone()));
        }

        self.responses
            .lock()
            .unwrap()
            .get(schema.name)
            .cloned()
            .ok_or_else(|| AppError::Provider(format!("No stub response for {}", schema.name)))
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn is_configured(&self) -> bool {
        true
    }
}
