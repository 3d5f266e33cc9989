//! braustin-e2e: end-to-end tests for the Braustin Homes site.
//!
//! Page objects wrap the site's markup behind suite-shaped methods; the
//! [`Fixture`] factory launches one browser per test and hands out page
//! objects sharing that browser's tab. The real-site suites live under
//! `tests/` and are `#[ignore]`d since they need Chrome and network access:
//!
//! ```bash
//! cargo test -p braustin-e2e -- --ignored
//! ```
//!
//! `BRAUSTIN_BASE_URL` points the suite at a different deployment;
//! `E2E_NO_SANDBOX=1` is required in most containers.

pub mod fixtures;
pub mod pages;

pub use fixtures::Fixture;
pub use pages::{AllModelsPage, BasePage, Header, OneModelPage};
