/// Domain models for VibeTune
///
/// These models are transport-agnostic and represent the values flowing
/// through one recommendation run.
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ages at or above this bound are rejected as implausible
pub const MAX_PLAUSIBLE_AGE: u32 = 130;

/// Free-text description of how the user feels or what they are doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Creates a description, rejecting empty or whitespace-only input
    pub fn new(text: impl AsRef<str>) -> Result<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput(
                "Please enter a description first!".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mood detected in a description (closed set)
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Heartbroken,
    Energetic,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Heartbroken, Mood::Energetic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Heartbroken => "Heartbroken",
            Mood::Energetic => "Energetic",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    /// Exact match only: "sad" or " Sad" are not coerced.
    fn from_str(s: &str) -> Result<Self> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown mood: {:?}", s)))
    }
}

/// Attributes extracted from a description
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Insights {
    pub age: u32,
    pub mood: Mood,
}

/// Wire shape of the insights response before validation
#[derive(Debug, Deserialize)]
struct RawInsights {
    age: i64,
    mood: String,
}

impl Insights {
    /// Creates insights after checking the age bound
    pub fn new(age: i64, mood: Mood) -> Result<Self> {
        if age < 0 || age >= MAX_PLAUSIBLE_AGE as i64 {
            return Err(AppError::Validation(format!(
                "Age {} is outside 0..{}",
                age, MAX_PLAUSIBLE_AGE
            )));
        }
        Ok(Self {
            age: age as u32,
            mood,
        })
    }

    /// Decodes and validates a structured-output payload
    ///
    /// Malformed JSON or missing fields are provider errors; a well-formed
    /// payload with an out-of-set mood or out-of-range age is a validation error.
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: RawInsights = serde_json::from_str(payload).map_err(|e| {
            AppError::Provider(format!("Non-conforming insights response: {}", e))
        })?;

        let mood = raw.mood.parse::<Mood>()?;
        Self::new(raw.age, mood)
    }
}

/// A single song suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SongRecommendation {
    #[serde(rename = "song")]
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    #[serde(alias = "eraofmusic")]
    pub era: String,
}

impl SongRecommendation {
    /// Decodes and validates a structured-output payload
    pub fn from_json(payload: &str) -> Result<Self> {
        let song: SongRecommendation = serde_json::from_str(payload).map_err(|e| {
            AppError::Provider(format!("Non-conforming song response: {}", e))
        })?;
        song.validate()?;
        Ok(song)
    }

    /// Every field must carry text
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("song", &self.title),
            ("artist", &self.artist),
            ("album", &self.album),
            ("genre", &self.genre),
            ("era", &self.era),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Song recommendation field '{}' is empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Result of one complete pipeline run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub insights: Insights,
    pub song: SongRecommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_rejects_blank_input() {
        assert!(matches!(
            Description::new(""),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            Description::new("  \n\t "),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_description_is_trimmed() {
        let description = Description::new("  long day at work \n").unwrap();
        assert_eq!(description.as_str(), "long day at work");
    }

    #[test]
    fn test_mood_parsing_is_exact() {
        assert_eq!("Heartbroken".parse::<Mood>().unwrap(), Mood::Heartbroken);
        assert!("sad".parse::<Mood>().is_err());
        assert!("Melancholic".parse::<Mood>().is_err());
        assert!(" Happy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_insights_from_json() {
        let insights = Insights::from_json(r#"{"age": 29, "mood": "Sad"}"#).unwrap();
        assert_eq!(
            insights,
            Insights {
                age: 29,
                mood: Mood::Sad
            }
        );
    }

    #[test]
    fn test_insights_serialize_mood_by_variant_name() {
        let value = serde_json::to_value(Insights {
            age: 41,
            mood: Mood::Heartbroken,
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "age": 41, "mood": "Heartbroken" }));
        assert_eq!(
            value["mood"].as_str().unwrap().parse::<Mood>().unwrap(),
            Mood::Heartbroken
        );
    }

    #[test]
    fn test_insights_unknown_mood_is_validation_error() {
        let result = Insights::from_json(r#"{"age": 29, "mood": "Bored"}"#);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_insights_age_bounds() {
        assert!(Insights::new(0, Mood::Happy).is_ok());
        assert!(Insights::new(129, Mood::Happy).is_ok());
        assert!(matches!(
            Insights::new(130, Mood::Happy),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Insights::new(-1, Mood::Happy),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_insights_malformed_payload_is_provider_error() {
        assert!(matches!(
            Insights::from_json("not json"),
            Err(AppError::Provider(_))
        ));
        assert!(matches!(
            Insights::from_json(r#"{"mood": "Sad"}"#),
            Err(AppError::Provider(_))
        ));
        assert!(matches!(
            Insights::from_json(r#"{"age": "twenty", "mood": "Sad"}"#),
            Err(AppError::Provider(_))
        ));
    }

    #[test]
    fn test_song_from_json_accepts_original_era_field() {
        let song = SongRecommendation::from_json(
            r#"{"song": "Mad World", "artist": "Gary Jules", "album": "Donnie Darko Soundtrack", "genre": "Alternative", "eraofmusic": "2000s"}"#,
        )
        .unwrap();
        assert_eq!(song.title, "Mad World");
        assert_eq!(song.era, "2000s");
    }

    #[test]
    fn test_song_with_empty_field_is_rejected() {
        let result = SongRecommendation::from_json(
            r#"{"song": "Mad World", "artist": " ", "album": "Donnie Darko Soundtrack", "genre": "Alternative", "era": "2000s"}"#,
        );
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("artist")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_song_serializes_title_as_song() {
        let song = SongRecommendation {
            title: "Mad World".to_string(),
            artist: "Gary Jules".to_string(),
            album: "Donnie Darko Soundtrack".to_string(),
            genre: "Alternative".to_string(),
            era: "2000s".to_string(),
        };
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["song"], "Mad World");
        assert!(value.get("title").is_none());
    }
}
