use color_eyre::Result;
use color_eyre::eyre::Context;

use crate::services::beatport::types::GenreMatch;

/// Render the outcome of a lookup for `song`.
///
/// Pretty output is a labelled block; otherwise a single line with the match
/// as JSON.
pub fn render(song: &str, genre_match: Option<&GenreMatch>, pretty: bool) -> Result<String> {
    let Some(genre_match) = genre_match else {
        return Ok(format!("Could not find genre for '{}'.", song));
    };

    if pretty {
        let artists: &str = if genre_match.matched_artists.is_empty() {
            "N/A"
        } else {
            &genre_match.matched_artists
        };
        Ok([
            format!("Genre information for: {}", song),
            format!("  Matched Title  : {}", genre_match.matched_title),
            format!("  Matched Artists: {}", artists),
            format!("  Genre          : {}", genre_match.genre),
            format!("  Match Score    : {:?}", genre_match.score),
        ]
        .join("\n"))
    } else {
        let summary =
            serde_json::to_string(genre_match).wrap_err("Failed to serialize genre match")?;
        Ok(format!("'{}': {}", song, summary))
    }
}
