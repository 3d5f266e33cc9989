//! Per-test object factory.
//!
//! Replaces a global fixture registry with an explicit factory: each test
//! launches its own [`Fixture`], which owns one browser and one tab and
//! constructs page objects against that tab on demand.

use braustin_harness::{HarnessConfig, PageHandle, Result, TestBrowser};

use crate::pages::{AllModelsPage, BasePage, OneModelPage};

/// One browser, one tab, and the page objects built on top of them.
pub struct Fixture {
    browser: TestBrowser,
    page: PageHandle,
}

impl Fixture {
    /// Launches a fixture with environment-derived configuration.
    pub async fn launch() -> Result<Self> {
        Self::with_config(HarnessConfig::from_env()).await
    }

    /// Launches a fixture with an explicit configuration.
    pub async fn with_config(config: HarnessConfig) -> Result<Self> {
        let browser = TestBrowser::launch(&config)
            .await
            .map_err(|e| e.context("launching fixture browser"))?;
        let page = browser.new_page().await?;
        Ok(Self { browser, page })
    }

    /// The configuration this fixture was launched with.
    pub fn config(&self) -> &HarnessConfig {
        self.browser.config()
    }

    /// The tab shared by this fixture's page objects.
    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    /// Builds a base page object (header and shared navigation).
    pub fn base_page(&self) -> BasePage {
        BasePage::new(self.page.clone(), self.config())
    }

    /// Builds the all-models grid page object.
    pub fn all_models_page(&self) -> AllModelsPage {
        AllModelsPage::new(self.page.clone(), self.config())
    }

    /// Builds the single-model detail page object.
    pub fn one_model_page(&self) -> OneModelPage {
        OneModelPage::new(self.page.clone(), self.config())
    }

    /// Best-effort failure screenshot under the configured directory.
    pub async fn capture_failure(&self, test_name: &str) {
        let path = self
            .config()
            .screenshot_dir
            .join(format!("{test_name}-failure.png"));
        match self.page.save_screenshot(&path).await {
            Ok(()) => tracing::info!("Failure screenshot written to {}", path.display()),
            Err(e) => tracing::warn!(
                "Failed to capture failure screenshot {}: {}",
                path.display(),
                e
            ),
        }
    }

    /// Closes the browser.
    pub async fn close(&self) -> Result<()> {
        self.browser.close().await
    }
}
