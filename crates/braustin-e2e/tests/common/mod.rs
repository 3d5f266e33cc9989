//! Shared support for the real-site suites.

#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Once};
use std::time::Duration;

use braustin_e2e::Fixture;
use braustin_harness::{BrowsingContext, LoadState, PageHandle};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initializes logging once per test binary; `RUST_LOG` controls the level.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    });
}

/// Launches a fixture, runs the test body, and captures a screenshot named
/// after the test when the body fails.
pub async fn with_fixture<F, Fut>(test_name: &str, test: F)
where
    F: FnOnce(Arc<Fixture>) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    init_tracing();
    let fixture = Arc::new(
        Fixture::launch()
            .await
            .expect("failed to launch browser fixture"),
    );

    let result = test(Arc::clone(&fixture)).await;

    if result.is_err() {
        fixture.capture_failure(test_name).await;
    }
    if let Err(e) = fixture.close().await {
        tracing::warn!("Failed to close browser: {}", e);
    }
    if let Err(e) = result {
        panic!("{test_name} failed: {e:#}");
    }
}

/// Best-effort wait for the document after an in-page click navigation.
pub async fn settle(page: &PageHandle) {
    if let Err(e) = page
        .wait_for_load_state(LoadState::DomContentLoaded, Duration::from_secs(10))
        .await
    {
        tracing::debug!("Post-click settle wait failed: {}", e);
    }
}

/// Asserts the current URL contains `expected`.
pub async fn assert_url_contains(page: &PageHandle, expected: &str) -> anyhow::Result<()> {
    let url = page.url().await?;
    anyhow::ensure!(
        url.contains(expected),
        "expected URL containing '{expected}', got '{url}'"
    );
    Ok(())
}

/// Parses a "$1,234" style payment readout into a number.
pub fn parse_payment(text: &str) -> anyhow::Result<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .parse()
        .map_err(|e| anyhow::anyhow!("cannot parse payment '{text}': {e}"))
}
