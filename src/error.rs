use std::time::Duration;

/// Failures that abort a genre lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Timed out after {}s waiting for `{selector}`", .timeout.as_secs_f64())]
    Timeout { selector: String, timeout: Duration },
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },
    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl From<chromiumoxide::error::CdpError> for LookupError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Browser(err.to_string())
    }
}

/// Reasons a single search result row could not be turned into a candidate.
///
/// These never escape row extraction; the row is skipped instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Missing element: {0}")]
    MissingElement(&'static str),
}
