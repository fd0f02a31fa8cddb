/// Domain layer - core business models
///
/// These models are provider-agnostic and represent the values of one recommendation run.
pub mod models;
pub mod prompts;
pub mod schemas;

pub use models::{Description, Insights, Mood, Recommendation, SongRecommendation};
pub use prompts::PromptTemplates;
pub use schemas::ResponseSchema;
