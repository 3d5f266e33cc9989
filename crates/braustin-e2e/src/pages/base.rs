//! Shared header controls and navigation common to every page.

use std::time::Duration;

use braustin_harness::{
    BrowsingContext, HarnessConfig, LoadState, Locator, Navigator, PageHandle, Result,
};

/// The site header: top-level menus and the controls behind them.
///
/// Menus open on hover; the per-menu entries are only present in the DOM
/// while their menu is open.
#[derive(Debug, Clone)]
pub struct Header {
    page: PageHandle,
}

impl Header {
    pub(crate) fn new(page: PageHandle) -> Self {
        Self { page }
    }

    // Homes menu

    pub fn homes_button(&self) -> Locator {
        self.page.get_by_text("Homes").first()
    }

    pub fn all_models(&self) -> Locator {
        self.page.get_by_text("All Models")
    }

    pub fn in_stock(&self) -> Locator {
        self.page.get_by_text("In Stock")
    }

    pub fn on_land(&self) -> Locator {
        self.page.get_by_text("On Land")
    }

    pub fn on_sale(&self) -> Locator {
        self.page.get_by_text("On Sale")
    }

    pub fn saved(&self) -> Locator {
        self.page.get_by_text("Saved")
    }

    // About menu

    pub fn about_button(&self) -> Locator {
        self.page.get_by_text("About")
    }

    pub fn braustin_story(&self) -> Locator {
        self.page.get_by_text("Braustin Story")
    }

    pub fn customer_stories(&self) -> Locator {
        self.page.get_by_text("Customer Stories")
    }

    pub fn locations(&self) -> Locator {
        self.page.get_by_text("Locations")
    }

    // Learn menu

    pub fn learn_button(&self) -> Locator {
        self.page.get_by_text("Learn")
    }

    pub fn blog(&self) -> Locator {
        self.page.get_by_text("Blog")
    }

    pub fn academy(&self) -> Locator {
        self.page.get_by_text("Academy")
    }

    pub fn podcast(&self) -> Locator {
        self.page.get_by_text("Podcast")
    }

    pub fn faqs(&self) -> Locator {
        self.page.get_by_text("FAQs")
    }

    pub fn braustin_scholars(&self) -> Locator {
        self.page.get_by_text("Braustin Scholars")
    }

    // Contact menu

    pub fn contact_us_button(&self) -> Locator {
        self.page.get_by_text("Contact Us")
    }

    pub fn commercial_accounts(&self) -> Locator {
        self.page.get_by_text("Commercial Accounts")
    }

    pub fn skirting(&self) -> Locator {
        self.page.get_by_text("Skirting")
    }

    pub fn phone_number(&self) -> Locator {
        self.page.get_by_text("830-355-6279")
    }

    // Search

    pub fn search_button(&self) -> Locator {
        self.page.get_by_text("Search")
    }

    /// The header search field (the second search input in the DOM).
    pub fn search_input(&self) -> Locator {
        self.page.locator(r#"input[type="search"]"#).nth(1)
    }
}

/// Capabilities every page object shares: the header and retrying
/// navigation. Page-specific objects hold one of these by composition.
#[derive(Debug, Clone)]
pub struct BasePage {
    page: PageHandle,
    navigator: Navigator,
    header: Header,
    idle_timeout: Duration,
}

impl BasePage {
    pub fn new(page: PageHandle, config: &HarnessConfig) -> Self {
        Self {
            navigator: Navigator::from_config(config),
            header: Header::new(page.clone()),
            idle_timeout: config.idle_timeout,
            page,
        }
    }

    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Transitions to `path` with bounded retry; see [`Navigator`].
    pub async fn navigate(&self, path: &str) -> Result<()> {
        self.navigator.navigate(&self.page, path).await
    }

    /// Best-effort wait for the network to settle. Never fails the test;
    /// a page that keeps polling in the background logs and moves on.
    pub async fn wait_for_page_load(&self) {
        if let Err(e) = self
            .page
            .wait_for_load_state(LoadState::NetworkIdle, self.idle_timeout)
            .await
        {
            tracing::debug!("Network idle wait failed: {}", e);
        }
    }

    /// Types `term` into the header search field and submits it.
    pub async fn search(&self, term: &str) -> Result<()> {
        let input = self.header.search_input();
        input.click().await?;
        input.fill(term).await?;
        input.press("Enter").await?;
        Ok(())
    }
}
