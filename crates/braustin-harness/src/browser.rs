//! Browser process lifecycle.
//!
//! Launches headless Chrome over the DevTools protocol and hands out
//! [`PageHandle`]s. Each test owns its own `TestBrowser`; pages are not
//! shared across tests.

use std::sync::Arc;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::page::PageHandle;

/// A running Chrome instance plus its CDP message pump.
#[derive(Debug)]
pub struct TestBrowser {
    inner: Arc<Mutex<Browser>>,
    handler: JoinHandle<()>,
    config: HarnessConfig,
}

impl TestBrowser {
    /// Launches Chrome with the given configuration.
    pub async fn launch(config: &HarnessConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.window_size.0, config.window_size.1);

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chrome_executable {
            builder = builder.chrome_executable(path.clone());
        }

        let browser_config = builder.build().map_err(Error::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::LaunchFailed(e.to_string()))?;

        // The handler stream must be pumped for any CDP call to make
        // progress; it ends when the browser process goes away.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler stopped: {}", e);
                    break;
                }
            }
        });

        tracing::debug!(
            "Launched browser (headless: {}, base_url: {})",
            config.headless,
            config.base_url
        );

        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handler: handle,
            config: config.clone(),
        })
    }

    /// Opens a new tab against the configured base URL.
    pub async fn new_page(&self) -> Result<PageHandle> {
        let browser = self.inner.lock().await;
        let page = browser.new_page("about:blank").await?;
        PageHandle::new(page, &self.config).await
    }

    /// Harness configuration this browser was launched with.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Closes the browser and stops the message pump.
    pub async fn close(&self) -> Result<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await?;
        browser.wait().await?;
        self.handler.abort();
        Ok(())
    }
}
