use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use url::Url;

use crate::config::BrowserSettings;
use crate::error::LookupError;
use crate::ports::browser::BrowserSession;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chrome switches for a session. Headless sessions use Chrome's new headless
/// mode, which renders like a regular window.
fn launch_args(settings: &BrowserSettings) -> Vec<&'static str> {
    let mut args = vec!["--disable-dev-shm-usage"];
    if settings.headless {
        args.push("--headless=new");
    }
    args
}

/// A headless Chromium instance with a single page.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    closed: bool,
}

impl ChromiumSession {
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, LookupError> {
        // The builder's own headless flag is the legacy mode; `launch_args`
        // selects the new one.
        let mut builder = BrowserConfig::builder()
            .with_head()
            .no_sandbox()
            .args(launch_args(settings))
            .window_size(settings.window_width, settings.window_height);
        if let Some(executable) = &settings.chrome_executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(LookupError::Browser)?;

        log::debug!("Launching browser");
        let (mut browser, mut handler) = Browser::launch(config).await?;

        // The handler drives the CDP connection and must be polled until the
        // browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::trace!("CDP handler error (continuing): {}", e);
                }
            }
            log::trace!("CDP handler finished");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    log::debug!("Browser close error (ignored): {}", close_err);
                }
                handler_task.abort();
                return Err(e.into());
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
            closed: false,
        })
    }
}

#[async_trait::async_trait]
impl BrowserSession for ChromiumSession {
    async fn open(&self, url: &Url) -> Result<(), LookupError> {
        self.page
            .goto(url.as_str())
            .await
            .map_err(|e| LookupError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<usize, LookupError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.page.find_elements(selector).await {
                Ok(elements) if !elements.is_empty() => return Ok(elements.len()),
                Ok(_) => {}
                Err(e) => log::trace!("Query for `{}` failed (retrying): {}", selector, e),
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(LookupError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn content(&self) -> Result<String, LookupError> {
        Ok(self.page.content().await?)
    }

    async fn close(&mut self) -> Result<(), LookupError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        log::debug!("Closing browser");
        let result = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            log::debug!("Waiting for browser exit failed: {}", e);
        }
        self.handler_task.abort();
        result?;
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_args_use_new_headless_mode() {
        let args = launch_args(&BrowserSettings::default());
        assert!(args.contains(&"--headless=new"));
        assert!(!args.contains(&"--headless"));
        assert!(args.contains(&"--disable-dev-shm-usage"));
    }

    #[test]
    fn test_launch_args_headed() {
        let settings = BrowserSettings {
            headless: false,
            ..BrowserSettings::default()
        };
        let args = launch_args(&settings);
        assert!(!args.iter().any(|arg| arg.starts_with("--headless")));
    }
}
