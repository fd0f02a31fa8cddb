//! Attribute extraction stage

use crate::domain::{Description, Insights, PromptTemplates, ResponseSchema};
use crate::error::Result;
use crate::ports::llm::{CompletionPort, LlmConfig};
use crate::ports::recommendation::AttributeExtractor;
use async_trait::async_trait;
use std::sync::Arc;

/// Extracts age and mood by asking a completion provider for the `insights` shape
pub struct LlmAttributeExtractor {
    provider: Arc<dyn CompletionPort>,
    config: LlmConfig,
}

impl LlmAttributeExtractor {
    pub fn new(provider: Arc<dyn CompletionPort>, config: LlmConfig) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl AttributeExtractor for LlmAttributeExtractor {
    async fn extract(&self, description: &Description) -> Result<Insights> {
        let prompt = PromptTemplates::render_insights(description);
        let payload = self
            .provider
            .complete_structured(&prompt, &ResponseSchema::insights(), &self.config)
            .await?;

        let insights = Insights::from_json(&payload)?;
        log::debug!(
            "Extracted insights: age {}, mood {}",
            insights.age,
            insights.mood
        );
        Ok(insights)
    }
}
