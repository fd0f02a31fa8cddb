//! Song recommendation stage

use crate::domain::{Insights, PromptTemplates, ResponseSchema, SongRecommendation};
use crate::error::Result;
use crate::ports::llm::{CompletionPort, LlmConfig};
use crate::ports::recommendation::SongRecommender;
use async_trait::async_trait;
use std::sync::Arc;

/// Suggests a song by asking a completion provider for the `song_recommendation` shape
pub struct LlmSongRecommender {
    provider: Arc<dyn CompletionPort>,
    config: LlmConfig,
}

impl LlmSongRecommender {
    pub fn new(provider: Arc<dyn CompletionPort>, config: LlmConfig) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl SongRecommender for LlmSongRecommender {
    async fn recommend(&self, insights: &Insights) -> Result<SongRecommendation> {
        let prompt = PromptTemplates::render_song(insights);
        let payload = self
            .provider
            .complete_structured(
                &prompt,
                &ResponseSchema::song_recommendation(),
                &self.config,
            )
            .await?;

        let song = SongRecommendation::from_json(&payload)?;
        log::debug!("Recommended '{}' by {}", song.title, song.artist);
        Ok(song)
    }
}
