pub mod extract;
pub mod types;

use std::time::Duration;

use url::Url;

use crate::config::{Config, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::error::LookupError;
use crate::ports::browser::BrowserSession;
use extract::{ROW_SELECTOR, parse_rows};
use types::{Candidate, GenreMatch};

#[derive(Debug, Clone)]
pub struct LookupOptions {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl From<&Config> for LookupOptions {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Looks up a track's genre on Beatport through a browser session.
///
/// The service owns the session and releases it when the lookup finishes.
pub struct GenreLookupService<S: BrowserSession> {
    session: S,
    options: LookupOptions,
}

impl<S: BrowserSession> GenreLookupService<S> {
    pub fn new(session: S, options: LookupOptions) -> Self {
        Self { session, options }
    }

    /// Find the genre of the search result that best matches `query`.
    ///
    /// Returns `Ok(None)` when rows rendered but none could be extracted. The
    /// browser session is closed exactly once whatever the outcome.
    pub async fn lookup(mut self, query: &str) -> Result<Option<GenreMatch>, LookupError> {
        let outcome = self.search(query).await;

        if let Err(e) = self.session.close().await {
            log::warn!("Failed to close browser session: {}", e);
        }

        outcome
    }

    async fn search(&self, query: &str) -> Result<Option<GenreMatch>, LookupError> {
        let url = build_search_url(&self.options.endpoint, query)?;
        log::debug!("Searching Beatport: {}", url);

        self.session.open(&url).await?;
        let row_count = self
            .session
            .wait_for(ROW_SELECTOR, self.options.timeout)
            .await?;
        log::debug!("{} result rows rendered", row_count);

        let html = self.session.content().await?;
        let rows = parse_rows(&html);
        log::debug!("Extracted {} of {} rows", rows.len(), row_count);

        let best = select_best(rows.into_iter().map(|row| Candidate::from_row(row, query)));
        if let Some(candidate) = &best {
            log::info!(
                "Best match for '{}': {:?} by {:?} ({}, score {:.3})",
                query,
                candidate.title,
                candidate.artists,
                candidate.genre,
                candidate.score
            );
        }

        Ok(best.map(GenreMatch::from))
    }
}

/// `<endpoint>?q=<query>`, form-encoded (spaces become `+`).
pub fn build_search_url(endpoint: &str, query: &str) -> Result<Url, LookupError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut().append_pair("q", query);
    Ok(url)
}

/// The highest scoring candidate; the earliest wins a tie.
pub fn select_best(candidates: impl IntoIterator<Item = Candidate>) -> Option<Candidate> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(best) if best.score >= candidate.score => Some(best),
        _ => Some(candidate),
    })
}
