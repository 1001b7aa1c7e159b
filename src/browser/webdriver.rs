//! WebDriver-backed renderer using fantoccini.
//!
//! Expects a running driver (chromedriver by default) at `Config::webdriver_url`.
//! Installing and starting the driver is left to the user.

use crate::browser::{PageRenderer, RenderError};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Chrome session driven over the WebDriver protocol.
pub struct WebDriverRenderer {
    client: Option<Client>,
}

impl WebDriverRenderer {
    /// Opens a new browser session with the given configuration.
    pub async fn connect(config: &Config) -> Result<Self> {
        debug!("Connecting to WebDriver at {}", config.webdriver_url);

        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(config))
            .connect(&config.webdriver_url)
            .await
            .with_context(|| {
                format!("Failed to start a browser session at {}", config.webdriver_url)
            })?;

        info!("Browser session started");
        Ok(Self { client: Some(client) })
    }

    fn client(&self) -> Result<&Client, RenderError> {
        self.client.as_ref().ok_or(RenderError::SessionClosed)
    }
}

/// Builds `goog:chromeOptions` from the browser settings.
pub(crate) fn chrome_capabilities(config: &Config) -> Capabilities {
    let mut args = Vec::with_capacity(config.browser_args.len() + 1);
    if config.headless {
        args.push("--headless".to_string());
    }
    args.extend(config.browser_args.iter().cloned());

    let mut chrome = serde_json::Map::new();
    chrome.insert("args".to_string(), json!(args));
    if let Some(binary) = &config.browser_binary {
        chrome.insert("binary".to_string(), json!(binary));
    }

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), Value::Object(chrome));
    caps
}

fn driver_error(err: CmdError) -> RenderError {
    RenderError::Driver(err.to_string())
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    async fn load(&mut self, url: &str) -> Result<(), RenderError> {
        debug!("GET {}", url);
        self.client()?.goto(url).await.map_err(driver_error)
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), RenderError> {
        let found = self
            .client()?
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await;

        match found {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => {
                Err(RenderError::Timeout { selector: selector.to_string(), timeout })
            }
            Err(e) => Err(driver_error(e)),
        }
    }

    async fn current_dom(&mut self) -> Result<String, RenderError> {
        self.client()?.source().await.map_err(driver_error)
    }

    async fn shutdown(&mut self) -> Result<(), RenderError> {
        match self.client.take() {
            Some(client) => {
                info!("Closing browser session");
                client.close().await.map_err(driver_error)
            }
            None => Ok(()),
        }
    }
}
