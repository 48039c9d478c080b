use serde::Serialize;

use super::extract::SearchRow;
use crate::matching::{match_string, similarity};

/// A search result row scored against the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Similarity in `[0, 1]`
    pub score: f64,
    pub genre: String,
    pub title: String,
    /// May be empty
    pub artists: String,
}

impl Candidate {
    /// Score a row against the raw (un-normalized) query.
    pub fn from_row(row: SearchRow, query: &str) -> Self {
        let score = similarity(query, &match_string(&row.artists, &row.title));
        Self {
            score,
            genre: row.genre,
            title: row.title,
            artists: row.artists,
        }
    }
}

/// The genre of the best matching search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreMatch {
    pub genre: String,
    pub matched_title: String,
    pub matched_artists: String,
    /// Rounded to 3 decimal places, ties to even
    pub score: f64,
}

impl From<Candidate> for GenreMatch {
    fn from(candidate: Candidate) -> Self {
        Self {
            genre: candidate.genre,
            matched_title: candidate.title,
            matched_artists: candidate.artists,
            score: (candidate.score * 1000.0).round_ties_even() / 1000.0,
        }
    }
}
