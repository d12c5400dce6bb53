//! Error category classification for unified error handling.
//!
//! Categories give the widget a coarse handle on what went wrong so it can
//! decide between retrying, degrading to a fallback chat message, or asking
//! the host to fix its configuration.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, DNS, timeout).
    /// Generally transient and retryable.
    Network,

    /// Backend/server-side errors (HTTP 5xx, error events on the stream).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (bugs, invalid state, malformed wire data).
    /// Not retryable - indicates a programming error on one side.
    Client,

    /// User action required (empty message, send already in flight).
    /// Not retryable until the user takes corrective action.
    User,

    /// Configuration errors (bad API URL, invalid host config object).
    /// Not retryable until configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
