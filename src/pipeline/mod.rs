//! Recommendation pipeline
//!
//! A run is strictly linear:
//!
//! ```text
//! Start -> Extracting -> Recommending -> Done
//!              \             \
//!               `-> Failed <--'
//! ```
//!
//! There is no retry transition. A failure in either working stage ends the
//! run and nothing partial is returned.

pub mod extractor;
pub mod recommender;

pub use extractor::LlmAttributeExtractor;
pub use recommender::LlmSongRecommender;

use crate::domain::{Description, Recommendation};
use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionPort, LlmConfig};
use crate::ports::recommendation::{AttributeExtractor, SongRecommender};
use std::sync::Arc;

/// Position of a run in the stage machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Extracting,
    Recommending,
    Done,
    Failed,
}

impl PipelineStage {
    /// Successful transition out of this stage
    pub fn advance(self) -> Self {
        match self {
            PipelineStage::Start => PipelineStage::Extracting,
            PipelineStage::Extracting => PipelineStage::Recommending,
            PipelineStage::Recommending => PipelineStage::Done,
            terminal => terminal,
        }
    }

    /// Failure transition; only the working stages can fail
    pub fn fail(self) -> Self {
        match self {
            PipelineStage::Extracting | PipelineStage::Recommending => PipelineStage::Failed,
            other => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Start => write!(f, "start"),
            PipelineStage::Extracting => write!(f, "extracting"),
            PipelineStage::Recommending => write!(f, "recommending"),
            PipelineStage::Done => write!(f, "done"),
            PipelineStage::Failed => write!(f, "failed"),
        }
    }
}

/// Orchestrates extraction followed by recommendation
///
/// Holds no per-run state, so one instance can serve any number of
/// independent runs.
pub struct Pipeline {
    extractor: Arc<dyn AttributeExtractor>,
    recommender: Arc<dyn SongRecommender>,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn AttributeExtractor>,
        recommender: Arc<dyn SongRecommender>,
    ) -> Self {
        Self {
            extractor,
            recommender,
        }
    }

    /// Build both stages on top of a single completion provider
    pub fn with_provider(provider: Arc<dyn CompletionPort>, config: LlmConfig) -> Self {
        Self::new(
            Arc::new(LlmAttributeExtractor::new(provider.clone(), config.clone())),
            Arc::new(LlmSongRecommender::new(provider, config)),
        )
    }

    /// Validate `description` and run it through the pipeline
    pub async fn run(&self, description: &str) -> Result<Recommendation> {
        let description = Description::new(description)?;
        self.run_description(&description).await
    }

    pub async fn run_description(&self, description: &Description) -> Result<Recommendation> {
        let mut stage = PipelineStage::Start.advance();
        log::debug!("Pipeline stage: {}", stage);

        let insights = match self.extractor.extract(description).await {
            Ok(insights) => insights,
            Err(e) => return Err(Self::abort(stage, e)),
        };

        // Every mood routes to the recommender. Per-mood prompt selection would branch here.
        stage = stage.advance();
        log::debug!("Pipeline stage: {} (mood {})", stage, insights.mood);

        let song = match self.recommender.recommend(&insights).await {
            Ok(song) => song,
            Err(e) => return Err(Self::abort(stage, e)),
        };

        stage = stage.advance();
        debug_assert!(stage.is_terminal());
        log::debug!("Pipeline stage: {}", stage);

        Ok(Recommendation { insights, song })
    }

    fn abort(stage: PipelineStage, error: AppError) -> AppError {
        log::warn!("Pipeline {} while {}: {}", stage.fail(), stage, error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Insights, Mood, SongRecommendation};
    use crate::ports::mocks::StubCompletion;
    use crate::ports::recommendation::{MockAttributeExtractor, MockSongRecommender};

    const RELAX: &str = "I just finished a long day at work and want to relax";

    fn mad_world() -> SongRecommendation {
        SongRecommendation {
            title: "Mad World".to_string(),
            artist: "Gary Jules".to_string(),
            album: "Donnie Darko Soundtrack".to_string(),
            genre: "Alternative".to_string(),
            era: "2000s".to_string(),
        }
    }

    fn stub_provider() -> StubCompletion {
        StubCompletion::new()
            .with_response("insights", r#"{"age": 29, "mood": "Sad"}"#)
            .with_response(
                "song_recommendation",
                r#"{"song": "Mad World", "artist": "Gary Jules", "album": "Donnie Darko Soundtrack", "genre": "Alternative", "era": "2000s"}"#,
            )
    }

    #[test]
    fn test_stage_transitions() {
        let mut stage = PipelineStage::Start;
        let mut visited = vec![stage];
        while !stage.is_terminal() {
            stage = stage.advance();
            visited.push(stage);
        }
        assert_eq!(
            visited,
            vec![
                PipelineStage::Start,
                PipelineStage::Extracting,
                PipelineStage::Recommending,
                PipelineStage::Done
            ]
        );
    }

    #[test]
    fn test_only_working_stages_fail() {
        assert_eq!(PipelineStage::Extracting.fail(), PipelineStage::Failed);
        assert_eq!(PipelineStage::Recommending.fail(), PipelineStage::Failed);
        assert_eq!(PipelineStage::Start.fail(), PipelineStage::Start);
        assert_eq!(PipelineStage::Done.fail(), PipelineStage::Done);
        assert_eq!(PipelineStage::Failed.advance(), PipelineStage::Failed);
    }

    #[tokio::test]
    async fn test_run_scenario_returns_combined_result() {
        let mut extractor = MockAttributeExtractor::new();
        extractor
            .expect_extract()
            .withf(|d| d.as_str() == RELAX)
            .times(1)
            .returning(|_| Ok(Insights { age: 29, mood: Mood::Sad }));

        let mut recommender = MockSongRecommender::new();
        recommender
            .expect_recommend()
            .withf(|i| i.age == 29 && i.mood == Mood::Sad)
            .times(1)
            .returning(|_| Ok(mad_world()));

        let pipeline = Pipeline::new(Arc::new(extractor), Arc::new(recommender));
        let result = pipeline.run(RELAX).await.unwrap();

        assert_eq!(
            result,
            Recommendation {
                insights: Insights { age: 29, mood: Mood::Sad },
                song: mad_world(),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_description_is_input_error() {
        let mut extractor = MockAttributeExtractor::new();
        extractor.expect_extract().times(0);
        let mut recommender = MockSongRecommender::new();
        recommender.expect_recommend().times(0);

        let pipeline = Pipeline::new(Arc::new(extractor), Arc::new(recommender));
        assert!(matches!(
            pipeline.run("").await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            pipeline.run("   ").await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_extractor_failure_skips_recommender() {
        let mut extractor = MockAttributeExtractor::new();
        extractor
            .expect_extract()
            .times(1)
            .returning(|_| Err(AppError::Provider("network unreachable".to_string())));

        let mut recommender = MockSongRecommender::new();
        recommender.expect_recommend().times(0);

        let pipeline = Pipeline::new(Arc::new(extractor), Arc::new(recommender));
        let result = pipeline.run(RELAX).await;

        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[tokio::test]
    async fn test_validation_failure_skips_recommender() {
        let mut extractor = MockAttributeExtractor::new();
        extractor
            .expect_extract()
            .times(1)
            .returning(|_| Err(AppError::Validation("Unknown mood: \"Bored\"".to_string())));

        let mut recommender = MockSongRecommender::new();
        recommender.expect_recommend().times(0);

        let pipeline = Pipeline::new(Arc::new(extractor), Arc::new(recommender));
        let err = pipeline.run(RELAX).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.is_provider_failure());
    }

    #[tokio::test]
    async fn test_recommender_failure_returns_no_partial_result() {
        let mut extractor = MockAttributeExtractor::new();
        extractor
            .expect_extract()
            .times(1)
            .returning(|_| Ok(Insights { age: 29, mood: Mood::Sad }));

        let mut recommender = MockSongRecommender::new();
        recommender
            .expect_recommend()
            .times(1)
            .returning(|_| Err(AppError::Provider("quota exceeded".to_string())));

        let pipeline = Pipeline::new(Arc::new(extractor), Arc::new(recommender));
        match pipeline.run(RELAX).await {
            Err(AppError::Provider(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_network_fault_on_first_call_never_reaches_song_stage() {
        let stub = StubCompletion::new()
            .with_failure("insights", "connection reset by peer")
            .with_response("song_recommendation", "{}");

        let pipeline = Pipeline::with_provider(Arc::new(stub.clone()), LlmConfig::default());
        let result = pipeline.run(RELAX).await;

        assert!(matches!(result, Err(AppError::Provider(_))));
        assert_eq!(stub.calls("insights"), 1);
        assert_eq!(stub.calls("song_recommendation"), 0);
    }

    #[tokio::test]
    async fn test_runs_against_deterministic_provider_are_identical() {
        let stub = stub_provider();
        let pipeline = Pipeline::with_provider(Arc::new(stub.clone()), LlmConfig::default());

        let first = pipeline.run(RELAX).await.unwrap();
        let second = pipeline.run(RELAX).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.song, mad_world());
        assert_eq!(stub.calls("insights"), 2);
        assert_eq!(stub.calls("song_recommendation"), 2);
    }

    #[tokio::test]
    async fn test_mood_is_always_in_closed_set() {
        for mood in Mood::ALL {
            let stub = stub_provider().with_response(
                "insights",
                &format!(r#"{{"age": 40, "mood": "{}"}}"#, mood),
            );
            let pipeline = Pipeline::with_provider(Arc::new(stub), LlmConfig::default());
            let result = pipeline.run(RELAX).await.unwrap();

            assert!(Mood::ALL.contains(&result.insights.mood));
            assert!(result.song.validate().is_ok());
        }
    }
}
