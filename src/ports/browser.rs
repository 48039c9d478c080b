use std::time::Duration;

use url::Url;

use crate::error::LookupError;

/// Port trait wrapping the browser automation capabilities used by the lookup.
///
/// Implementations live in `services::chromium` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the session's page to `url`.
    async fn open(&self, url: &Url) -> Result<(), LookupError>;

    /// Wait until at least one element matches `selector`, returning how many
    /// matched. Fails with [`LookupError::Timeout`] once `timeout` elapses.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<usize, LookupError>;

    /// Snapshot of the rendered page's HTML.
    async fn content(&self) -> Result<String, LookupError>;

    /// Release the browser. Safe to call more than once.
    async fn close(&mut self) -> Result<(), LookupError>;
}
