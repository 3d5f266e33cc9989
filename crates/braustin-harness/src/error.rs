// Error types for braustin-harness

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving the browser
#[derive(Debug, Error)]
pub enum Error {
    /// The Chrome/Chromium process could not be started
    ///
    /// Common causes: Chrome not installed, sandbox restrictions in
    /// containers (set `E2E_NO_SANDBOX=1`), or an invalid executable path.
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// DevTools protocol error from the underlying CDP connection
    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Screenshot payload could not be decoded
    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Timeout waiting for an operation
    ///
    /// Contains context about what was being waited on.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// A single navigation attempt exceeded its load timeout
    #[error("Navigation timeout after {duration_ms}ms navigating to '{url}'")]
    NavigationTimeout { url: String, duration_ms: u64 },

    /// Navigation failed after exhausting the retry budget
    ///
    /// Carries the number of attempts made and the error observed on the
    /// final attempt (not the first).
    #[error("Navigation to '{url}' failed after {attempts} attempts. Last error: {source}")]
    NavigationExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// Target was closed (browser or page)
    #[error("Target closed: cannot perform operation on closed {target_type}. {context}")]
    TargetClosed {
        target_type: String,
        context: String,
    },

    /// No element matched the selector
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid argument provided to a method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }
}
