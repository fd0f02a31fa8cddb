//! Prompt templates for the two completion calls
//!
//! Templates carry `{placeholder}` markers that are filled in by the
//! `render_*` helpers before the prompt reaches a provider.

use crate::domain::models::{Description, Insights, Mood};

/// Default prompt templates for each pipeline stage
pub struct PromptTemplates;

impl PromptTemplates {
    /// Prompt for extracting age and mood from a description
    pub fn insights() -> &'static str {
        r#"Analyze this description: {description}

Estimate the age of the person who wrote it and the mood they are in.
The mood must be exactly one of: {moods}."#
    }

    /// Prompt for suggesting a song that fits the extracted insights
    pub fn song() -> &'static str {
        r#"The user is {age} years old and feeling {mood}. Suggest a matching song.

Give the song title, the artist, the album it appears on, its genre and the era of music it belongs to."#
    }

    pub fn render_insights(description: &Description) -> String {
        let moods = Mood::ALL
            .iter()
            .map(Mood::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Self::insights()
            .replace("{moods}", &moods)
            .replace("{description}", description.as_str())
    }

    pub fn render_song(insights: &Insights) -> String {
        Self::song()
            .replace("{age}", &insights.age.to_string())
            .replace("{mood}", insights.mood.as_str())
    }
}
