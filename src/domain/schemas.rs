//! Structured-output shapes
//!
//! Each pipeline stage asks the provider for a response matching one of
//! these JSON Schemas. The schemas are strict: every property is required
//! and no extra properties are allowed.

use crate::domain::models::Mood;
use serde::Serialize;
use serde_json::{json, Value};

/// A named JSON Schema a completion must conform to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub schema: Value,
}

impl ResponseSchema {
    /// `{age: integer, mood: enum}`
    pub fn insights() -> Self {
        let moods: Vec<&str> = Mood::ALL.iter().map(Mood::as_str).collect();

        Self {
            name: "insights",
            schema: json!({
                "type": "object",
                "properties": {
                    "age": {
                        "type": "integer",
                        "description": "Estimated age of the user in years."
                    },
                    "mood": {
                        "type": "string",
                        "enum": moods,
                        "description": "The mood of the user."
                    }
                },
                "required": ["age", "mood"],
                "additionalProperties": false
            }),
        }
    }

    /// `{song, artist, album, genre, era}`, all strings
    pub fn song_recommendation() -> Self {
        let fields = ["song", "artist", "album", "genre", "era"];
        let properties: serde_json::Map<String, Value> = fields
            .iter()
            .map(|f| (f.to_string(), json!({ "type": "string" })))
            .collect();

        Self {
            name: "song_recommendation",
            schema: json!({
                "type": "object",
                "properties": properties,
                "required": fields,
                "additionalProperties": false
            }),
        }
    }
}
