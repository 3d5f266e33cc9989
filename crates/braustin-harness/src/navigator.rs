//! Page navigation with bounded retry.
//!
//! A transition is attempted up to `max_attempts` times. Each attempt waits
//! only for DOM-ready, bounded by the load timeout; a failed attempt is
//! followed by a fixed backoff pause. Once DOM-ready is observed the attempt
//! has succeeded, and a secondary network-idle settle is tried but never
//! fails the navigation. Only DOM-ready failures count toward the retry
//! budget.

use std::time::Duration;

use crate::config::HarnessConfig;
use crate::context::{BrowsingContext, LoadState};
use crate::error::{Error, Result};

/// Performs page transitions with bounded retry and a best-effort settle.
#[derive(Debug, Clone)]
pub struct Navigator {
    max_attempts: u32,
    backoff: Duration,
    load_timeout: Duration,
    idle_timeout: Duration,
}

impl Navigator {
    /// Creates a navigator with the suite defaults (3 attempts, 2s backoff,
    /// 45s load and idle timeouts).
    pub fn new() -> Self {
        Self::from_config(&HarnessConfig::new())
    }

    /// Creates a navigator from a [`HarnessConfig`].
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff,
            load_timeout: config.load_timeout,
            idle_timeout: config.idle_timeout,
        }
    }

    /// Sets the retry budget (clamped to at least 1)
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Sets the pause between failed attempts
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the per-attempt DOM-ready timeout
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Sets the network-idle settle timeout
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Transitions `ctx` to `path`, tolerating transient load failures.
    ///
    /// Returns as soon as an attempt reaches DOM-ready. An idle-settle
    /// failure after DOM-ready is logged and swallowed; it never triggers a
    /// retry. After the retry budget is exhausted, returns
    /// [`Error::NavigationExhausted`] carrying the final attempt's error.
    pub async fn navigate<C>(&self, ctx: &C, path: &str) -> Result<()>
    where
        C: BrowsingContext + ?Sized,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match ctx
                .goto(path, LoadState::DomContentLoaded, self.load_timeout)
                .await
            {
                Ok(()) => {
                    if let Err(e) = ctx
                        .wait_for_load_state(LoadState::NetworkIdle, self.idle_timeout)
                        .await
                    {
                        tracing::debug!(
                            "Network idle wait failed on attempt {} for '{}': {}",
                            attempt,
                            path,
                            e
                        );
                    }
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Navigation failed on attempt {} for '{}': {}", attempt, path, e);
                    last_error = Some(e);
                    // No backoff after the final attempt.
                    if attempt < self.max_attempts {
                        ctx.pause(self.backoff).await;
                    }
                }
            }
        }

        let source = match last_error {
            Some(e) => e,
            None => return Err(Error::InvalidArgument("max_attempts must be nonzero".into())),
        };
        Err(Error::NavigationExhausted {
            url: path.to_string(),
            attempts: self.max_attempts,
            source: Box::new(source),
        })
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
