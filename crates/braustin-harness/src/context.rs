//! Browsing-context abstraction consumed by the [`Navigator`].
//!
//! The trait covers exactly the three capabilities navigation needs:
//! requesting a transition bounded by a load-state condition, waiting for a
//! named load state, and pausing. The CDP-backed [`PageHandle`] implements
//! it for real runs; tests implement it with scripted fakes.
//!
//! [`Navigator`]: crate::navigator::Navigator
//! [`PageHandle`]: crate::page::PageHandle

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Named page load states, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The `DOMContentLoaded` event fired; structure is parsed, subresources
    /// may still be loading
    DomContentLoaded,
    /// The `load` event fired
    Load,
    /// No network connections for at least 500ms
    NetworkIdle,
}

impl LoadState {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::Load => "load",
            LoadState::NetworkIdle => "networkidle",
        }
    }
}

/// One isolated browser tab, as seen by the navigation layer.
#[async_trait]
pub trait BrowsingContext: Send + Sync {
    /// Requests a transition to `path` (relative or absolute), returning
    /// once `wait_until` is reached or erroring when `timeout` elapses.
    async fn goto(&self, path: &str, wait_until: LoadState, timeout: Duration) -> Result<()>;

    /// Waits until the page reaches `state`, erroring when `timeout`
    /// elapses first.
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> Result<()>;

    /// Pauses execution for `duration`.
    async fn pause(&self, duration: Duration);
}
