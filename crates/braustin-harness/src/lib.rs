//! braustin-harness: browser automation harness for the Braustin Homes
//! end-to-end suite.
//!
//! Wraps headless Chrome (via the DevTools protocol) behind a small,
//! suite-shaped API: a [`TestBrowser`] lifecycle, [`PageHandle`] tabs with
//! lazy [`Locator`]s, and a [`Navigator`] that retries page transitions
//! with a fixed backoff and a best-effort network-idle settle.
//!
//! # Example
//!
//! ```ignore
//! use braustin_harness::{HarnessConfig, Navigator, TestBrowser};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HarnessConfig::from_env();
//!     let browser = TestBrowser::launch(&config).await?;
//!     let page = browser.new_page().await?;
//!
//!     // Retry up to 3 times, waiting for DOM-ready on each attempt.
//!     let navigator = Navigator::from_config(&config);
//!     navigator.navigate(&page, "/shop/all-models").await?;
//!
//!     let cards = page.locator("a.homecard");
//!     assert!(cards.count().await? > 0);
//!
//!     browser.close().await?;
//!     Ok(())
//! }
//! ```

mod browser;
mod config;
mod context;
mod error;
mod navigator;
mod page;

pub use browser::TestBrowser;
pub use config::{
    DEFAULT_BACKOFF, DEFAULT_BASE_URL, DEFAULT_IDLE_TIMEOUT, DEFAULT_LOAD_TIMEOUT,
    DEFAULT_MAX_ATTEMPTS, HarnessConfig,
};
pub use context::{BrowsingContext, LoadState};
pub use error::{Error, Result};
pub use navigator::Navigator;
pub use page::{Locator, PageHandle};
