//! HTML rendering for the recommendation form
//!
//! Every piece of user or model text goes through `escape_html`.

use crate::domain::Recommendation;

const STYLE: &str = r#"
    body { background-color: #121212; color: #FFFFFF; font-family: sans-serif; max-width: 720px; margin: 40px auto; padding: 0 16px; }
    textarea { width: 100%; height: 150px; background: #181818; color: #FFFFFF; border: 1px solid #333; border-radius: 8px; padding: 10px; box-sizing: border-box; }
    button { background-color: #1DB954; color: white; border-radius: 20px; border: none; padding: 10px 24px; font-weight: bold; margin-top: 12px; cursor: pointer; }
    button:hover { background-color: #1ed760; }
    .success { background: #173d26; padding: 12px; border-radius: 8px; margin-top: 20px; }
    .warning { background: #4d3b12; padding: 12px; border-radius: 8px; margin-top: 20px; }
    .error { background: #4d1717; padding: 12px; border-radius: 8px; margin-top: 20px; }
    .song-card { background-color: #181818; padding: 20px; border-radius: 10px; border-left: 5px solid #1DB954; margin-top: 20px; }
    .song-card h2 { color: #1DB954; margin: 0; }
    .song-card hr { border-color: #333; }
"#;

/// What to show under the form
#[derive(Debug)]
pub enum Outcome<'a> {
    /// Fresh page, nothing submitted
    Empty,
    /// Submission blocked before the pipeline ran
    Warning(&'a str),
    /// The pipeline failed; no details are shown
    Failure,
    Success(&'a Recommendation),
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the full page with the form pre-filled with `description`
pub fn render_page(description: &str, outcome: Outcome<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>VibeTune - Music Suggester</title>
<style>{style}</style>
</head>
<body>
<h1>&#127925; VibeTune</h1>
<h3>What's your story today? Let AI find the perfect track.</h3>
<form method="post" action="/">
<label for="description">Describe how you're feeling or what you're doing:</label>
<textarea id="description" name="description" placeholder="e.g., I just finished a long day at work and want to relax...">{description}</textarea>
<button type="submit">Generate Recommendation</button>
</form>
{outcome}
</body>
</html>
"#,
        style = STYLE,
        description = escape_html(description),
        outcome = render_outcome(outcome),
    )
}

fn render_outcome(outcome: Outcome<'_>) -> String {
    match outcome {
        Outcome::Empty => String::new(),
        Outcome::Warning(message) => {
            format!(r#"<div class="warning">{}</div>"#, escape_html(message))
        }
        Outcome::Failure => r#"<div class="error">Something went wrong while finding your song. Please try again.</div>"#
            .to_string(),
        Outcome::Success(recommendation) => render_recommendation(recommendation),
    }
}

fn render_recommendation(recommendation: &Recommendation) -> String {
    let insights = &recommendation.insights;
    let song = &recommendation.song;

    format!(
        r#"<div class="success">Detected Mood: <b>{mood}</b> | Estimated Age: <b>{age}</b></div>
<div class="song-card">
<h2>{title}</h2>
<p>by <b>{artist}</b></p>
<hr>
<p><b>Album:</b> {album}</p>
<p><b>Genre:</b> {genre} | <b>Era:</b> {era}</p>
</div>"#,
        mood = insights.mood,
        age = insights.age,
        title = escape_html(&song.title),
        artist = escape_html(&song.artist),
        album = escape_html(&song.album),
        genre = escape_html(&song.genre),
        era = escape_html(&song.era),
    )
}
