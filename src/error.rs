//! Error types for rs-seo-audit.
//!
//! Every failure that aborts an analysis run maps to a stable error code
//! (`E001`..`E011`) so callers and the CLI can report it without parsing
//! the message text.

use std::time::Duration;

/// Error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page URL is empty, unparsable, or not http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page could not be reached over the network.
    #[error("Network error: {0}")]
    Network(String),

    /// The fetch completed but did not produce a usable response.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// The body exceeds the configured size limit.
    #[error("Content too large: {size} bytes (limit {limit})")]
    ContentTooLarge {
        /// Body size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The trimmed body is shorter than the configured minimum.
    #[error("Content too short: {length} characters (minimum {minimum})")]
    ContentTooShort {
        /// Trimmed body length in characters.
        length: usize,
        /// Configured minimum.
        minimum: usize,
    },

    /// The body is not an HTML document.
    #[error("Not an HTML document: {0}")]
    NotHtml(String),

    /// The server refused or dropped the connection.
    #[error("Server connection failed: {0}")]
    Connection(String),

    /// The fetch did not finish in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// TLS negotiation or certificate validation failed.
    #[error("SSL error: {0}")]
    Ssl(String),

    /// The server answered 404.
    #[error("Page not found (404)")]
    NotFound,

    /// The server answered 403.
    #[error("Access forbidden (403)")]
    Forbidden,

    /// Too many requests from one client inside the rate-limit window.
    #[error("Rate limit exceeded, retry after {}s", retry_after.as_secs())]
    RateLimited {
        /// Time until the oldest request leaves the window.
        retry_after: Duration,
    },

    /// A single signal collector failed. Never aborts a run.
    #[error("Collector {collector} failed: {reason}")]
    Collector {
        /// Collector name.
        collector: &'static str,
        /// Failure description.
        reason: String,
    },
}

impl Error {
    /// Stable error code reported to callers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "E001",
            Self::Network(_) => "E002",
            Self::FetchFailed(_) | Self::Collector { .. } => "E003",
            Self::ContentTooLarge { .. } | Self::ContentTooShort { .. } => "E004",
            Self::NotHtml(_) => "E005",
            Self::Connection(_) => "E006",
            Self::Timeout(_) => "E007",
            Self::Ssl(_) => "E008",
            Self::NotFound => "E009",
            Self::Forbidden => "E010",
            Self::RateLimited { .. } => "E011",
        }
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
