//! Configuration options for page analysis.
//!
//! The `Options` struct holds the extraction thresholds and the session
//! settings (cache lifetime, metrics timeout, rate limit). Scoring bands are
//! not configurable; they live as literal constants in the scoring table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration options for analysis and the fetch session.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings. Missing fields in a deserialized config fall back
/// to their defaults.
///
/// # Example
///
/// ```rust
/// use rs_seo_audit::Options;
///
/// let options = Options {
///     keyword_limit: 10,
///     ..Options::default()
/// };
/// assert_eq!(options.keyword_usage_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Minimum trimmed text length for a semantic container (`main`,
    /// `article`, content class names) to be accepted as main content.
    ///
    /// Default: `100`
    pub min_main_content_chars: usize,

    /// Minimum text length for the largest-container fallback.
    ///
    /// Default: `200`
    pub min_container_chars: usize,

    /// Below this many characters of extracted text the regex tag-stripping
    /// pass over the raw markup is used instead.
    ///
    /// Default: `10`
    pub min_extracted_chars: usize,

    /// Maximum accepted body size in bytes.
    ///
    /// Default: `10485760` (10 MiB)
    pub max_content_bytes: usize,

    /// Minimum trimmed body length in characters.
    ///
    /// Default: `100`
    pub min_body_chars: usize,

    /// Number of merged n-gram phrases kept in the keyword profile.
    ///
    /// Default: `15`
    pub keyword_limit: usize,

    /// Number of top phrases that receive usage scoring.
    ///
    /// Default: `5`
    pub keyword_usage_limit: usize,

    /// Lifetime of a cached primary analysis, in seconds.
    ///
    /// Default: `3600`
    pub cache_ttl_secs: u64,

    /// Deadline for the performance-metrics stage, in seconds.
    ///
    /// Default: `30`
    pub metrics_timeout_secs: u64,

    /// Requests allowed per client inside one rate-limit window.
    ///
    /// Default: `20`
    pub rate_limit_requests: usize,

    /// Length of the rolling rate-limit window, in seconds.
    ///
    /// Default: `60`
    pub rate_limit_window_secs: u64,
}

impl Options {
    /// Cache lifetime as a `Duration`.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Metrics deadline as a `Duration`.
    #[must_use]
    pub fn metrics_timeout(&self) -> Duration {
        Duration::from_secs(self.metrics_timeout_secs)
    }

    /// Rate-limit window as a `Duration`.
    #[must_use]
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_main_content_chars: 100,
            min_container_chars: 200,
            min_extracted_chars: 10,
            max_content_bytes: 10 * 1024 * 1024,
            min_body_chars: 100,
            keyword_limit: 15,
            keyword_usage_limit: 5,
            cache_ttl_secs: 3600,
            metrics_timeout_secs: 30,
            rate_limit_requests: 20,
            rate_limit_window_secs: 60,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_thresholds() {
        let opts = Options::default();

        assert_eq!(opts.min_main_content_chars, 100);
        assert_eq!(opts.min_container_chars, 200);
        assert_eq!(opts.min_extracted_chars, 10);
        assert_eq!(opts.max_content_bytes, 10_485_760);
        assert_eq!(opts.min_body_chars, 100);
        assert_eq!(opts.keyword_limit, 15);
        assert_eq!(opts.keyword_usage_limit, 5);
        assert_eq!(opts.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(opts.metrics_timeout(), Duration::from_secs(30));
        assert_eq!(opts.rate_limit_requests, 20);
        assert_eq!(opts.rate_limit_window(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let opts: Options =
            serde_json::from_str(r#"{"keyword_limit": 8, "cache_ttl_secs": 60}"#)
                .expect("config should parse");

        assert_eq!(opts.keyword_limit, 8);
        assert_eq!(opts.cache_ttl_secs, 60);
        assert_eq!(opts.min_body_chars, 100);
        assert_eq!(opts.rate_limit_requests, 20);
    }

    #[test]
    fn test_custom_thresholds() {
        let opts = Options {
            min_main_content_chars: 50,
            max_content_bytes: 1024,
            ..Options::default()
        };

        assert_eq!(opts.min_main_content_chars, 50);
        assert_eq!(opts.max_content_bytes, 1024);
        assert_eq!(opts.min_container_chars, 200);
    }
}
