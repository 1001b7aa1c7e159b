//! Page rendering through a headless browser.
//!
//! The crawl only needs four things from a browser: navigate, wait for an
//! element to show up, snapshot the rendered HTML, and quit. [`PageRenderer`]
//! captures exactly that so the extraction pipeline can run against recorded
//! pages in tests.

pub mod webdriver;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use webdriver::WebDriverRenderer;

/// Failures reported by a [`PageRenderer`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// Nothing matching `selector` appeared before the bound elapsed.
    #[error("timed out after {}ms waiting for `{selector}`", .timeout.as_millis())]
    Timeout { selector: String, timeout: Duration },

    /// The browser or driver rejected a command.
    #[error("browser command failed: {0}")]
    Driver(String),

    /// The session was already shut down.
    #[error("browser session is closed")]
    SessionClosed,
}

impl RenderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RenderError::Timeout { .. })
    }
}

/// A controllable browser session - enables replaying fixtures in tests.
#[async_trait]
pub trait PageRenderer: Send {
    /// Navigates to `url` and returns once the page has loaded.
    async fn load(&mut self, url: &str) -> Result<(), RenderError>;

    /// Waits until an element matching the CSS `selector` is present.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), RenderError>;

    /// Returns the HTML of the current page as rendered right now.
    async fn current_dom(&mut self) -> Result<String, RenderError>;

    /// Releases the browser session. Calling it again is a no-op.
    async fn shutdown(&mut self) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = RenderError::Timeout {
            selector: "table.table-striped".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "timed out after 10000ms waiting for `table.table-striped`");
    }

    #[test]
    fn test_driver_error_is_not_timeout() {
        let err = RenderError::Driver("connection refused".to_string());
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("connection refused"));
        assert!(!RenderError::SessionClosed.is_timeout());
    }
}
