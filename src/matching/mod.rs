//! Fuzzy matching of a free-text query against search result rows.

mod sequence_matcher;

use std::sync::LazyLock;

use regex::Regex;

pub use sequence_matcher::SequenceMatcher;

/// Mix/version details such as `(Radio Edit)` or `[Remastered]`.
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)|\[.*?\]").expect("bracket pattern is valid"));
static CLUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s\-\&/']").expect("clutter pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalize a title or query for comparison.
///
/// Lowercases, drops bracketed segments, replaces everything except ASCII
/// letters, digits, whitespace and `-&/'` with spaces, then collapses runs of
/// whitespace.
pub fn normalize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let lower = s.to_lowercase();
    let unbracketed = BRACKETED.replace_all(&lower, " ");
    let cleaned = CLUTTER.replace_all(&unbracketed, " ");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Similarity ratio in `[0, 1]` between the normalized forms of `a` and `b`.
pub fn similarity(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(&normalize(a), &normalize(b)).ratio()
}

/// The string a row is matched against: `"<artists> - <title>"`, or just the
/// title when no artists were found.
pub fn match_string(artists: &str, title: &str) -> String {
    if artists.is_empty() {
        title.to_string()
    } else {
        format!("{} - {}", artists, title)
    }
}
