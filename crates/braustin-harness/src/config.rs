//! Harness configuration.
//!
//! All knobs have defaults matching the values the suite was written
//! against; `from_env` lets CI override the ones that vary by machine.

use std::path::PathBuf;
use std::time::Duration;

/// Site the suite runs against unless `BRAUSTIN_BASE_URL` overrides it.
pub const DEFAULT_BASE_URL: &str = "https://www.braustin.com";

/// Maximum navigation attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Fixed pause between failed navigation attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);

/// Per-attempt bound on reaching DOM-ready.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(45);

/// Bound on the best-effort network-idle settle after DOM-ready.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(45);

/// Configuration for the browser and the navigation retry policy.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL relative paths are resolved against
    pub base_url: String,
    /// Run Chrome headless (default true; `E2E_HEADFUL=1` for a visible window)
    pub headless: bool,
    /// Chrome sandbox; disable in containers with `E2E_NO_SANDBOX=1`
    pub sandbox: bool,
    /// Explicit Chrome/Chromium binary, `None` to auto-detect
    pub chrome_executable: Option<PathBuf>,
    /// Viewport size
    pub window_size: (u32, u32),
    /// Per-attempt page-load timeout
    pub load_timeout: Duration,
    /// Network-idle settle timeout
    pub idle_timeout: Duration,
    /// Navigation retry budget
    pub max_attempts: u32,
    /// Pause between failed navigation attempts
    pub backoff: Duration,
    /// Directory failure screenshots are written to
    pub screenshot_dir: PathBuf,
}

impl HarnessConfig {
    /// Creates a config with the defaults the suite was written against.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            sandbox: true,
            chrome_executable: None,
            window_size: (1440, 900),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }

    /// Reads overrides from the environment on top of the defaults.
    ///
    /// Honors `BRAUSTIN_BASE_URL`, `E2E_HEADFUL`, `E2E_NO_SANDBOX`, and
    /// `CHROME_EXECUTABLE`.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(base_url) = std::env::var("BRAUSTIN_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        if env_flag("E2E_HEADFUL") {
            config.headless = false;
        }
        if env_flag("E2E_NO_SANDBOX") {
            config.sandbox = false;
        }
        if let Ok(path) = std::env::var("CHROME_EXECUTABLE") {
            if !path.is_empty() {
                config.chrome_executable = Some(PathBuf::from(path));
            }
        }
        config
    }

    /// Sets the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-attempt load timeout
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Sets the network-idle settle timeout
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Sets the navigation retry budget (clamped to at least 1)
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Sets the pause between failed navigation attempts
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}
