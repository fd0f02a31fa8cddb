/// Pipeline stage ports
///
/// The orchestrator only sees these two traits, so either stage can be
/// swapped for a test double.
use crate::domain::models::{Description, Insights, SongRecommendation};
use crate::error::Result;
use async_trait::async_trait;

/// Turns a free-text description into age and mood
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttributeExtractor: Send + Sync {
    async fn extract(&self, description: &Description) -> Result<Insights>;
}

/// Suggests a song for a set of insights
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongRecommender: Send + Sync {
    async fn recommend(&self, insights: &Insights) -> Result<SongRecommendation>;
}
