//! # rs-seo-audit
//!
//! On-page SEO analysis and scoring for a single HTML document.
//!
//! The engine parses a page once, extracts its main content, derives a set
//! of signals (meta tags, headings, images, links, structured data, mobile
//! usability, readability, keyword usage, trust markers) and scores them
//! against a fixed 100-point table. It then produces prioritized
//! recommendations. Keyword and readability heuristics keep Vietnamese
//! diacritics intact.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_seo_audit::analyze;
//!
//! let html = format!(
//!     "<html><head><title>Máy tính xách tay cho sinh viên</title></head>\
//!      <body><main><h1>Máy tính</h1><p>{}</p></main></body></html>",
//!     "Máy tính xách tay giá tốt cho sinh viên. ".repeat(10)
//! );
//!
//! let result = analyze(&html, "https://example.vn/may-tinh", Some("máy tính"))?;
//! println!("{}/{}", result.score(), result.display_max());
//! for rec in &result.recommendations {
//!     println!("[{}] {}", rec.priority.label(), rec.text);
//! }
//! # Ok::<(), rs_seo_audit::Error>(())
//! ```
//!
//! ## Two stages
//!
//! The primary result leaves the performance category pending (shown out of
//! 92). Core Web Vitals fetched later are merged with
//! [`merge_performance_metrics`], which lifts the maximum to 100. The
//! [`session`] module runs both stages against caller-supplied fetchers.
//!
//! ## Calculators
//!
//! [`calculators`] holds the bill splitter and the Vietnamese personal
//! income tax and VAT calculators served next to the audit.

mod analyze;
mod error;
mod options;
mod patterns;
mod result;

/// DOM access helpers over `dom_query`.
pub mod dom;

/// URL validation, host normalization and link resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Main-content extraction.
pub mod content;

/// Signal collectors.
pub mod signals;

/// Category table and score breakdown.
pub mod scoring;

/// Prioritized recommendations.
pub mod recommendations;

/// Text and JSON reports.
pub mod report;

/// Two-stage fetch-and-analyze orchestration.
pub mod session;

/// Bill splitter, income tax and VAT.
pub mod calculators;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use recommendations::{Priority, Recommendation};
pub use result::AnalysisResult;
pub use scoring::{Category, PerformanceMetrics, PerformanceState, ScoreTier, Status};
pub use signals::SiteProbes;

/// One page to analyze, with the optional inputs the boundary may supply.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub html: &'a str,
    pub url: &'a str,
    pub focus_keyword: Option<&'a str>,
    /// robots.txt, sitemap and www/non-www probe results.
    pub site: SiteProbes,
}

impl<'a> AnalysisRequest<'a> {
    #[must_use]
    pub fn new(html: &'a str, url: &'a str) -> Self {
        Self {
            html,
            url,
            focus_keyword: None,
            site: SiteProbes::default(),
        }
    }

    #[must_use]
    pub fn with_focus_keyword(mut self, keyword: Option<&'a str>) -> Self {
        self.focus_keyword = keyword;
        self
    }

    #[must_use]
    pub fn with_site_probes(mut self, site: SiteProbes) -> Self {
        self.site = site;
        self
    }
}

/// Analyzes an HTML document using default options.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `url` - Absolute http(s) URL the document was served from
/// * `focus_keyword` - Keyword the page should rank for, if known
///
/// # Errors
///
/// `E001` for an invalid URL, `E004` for a body over the size limit or
/// under 100 characters after trimming. Collector failures never abort the
/// run; they show up in [`AnalysisResult::warnings`].
pub fn analyze(html: &str, url: &str, focus_keyword: Option<&str>) -> Result<AnalysisResult> {
    analyze_with_options(html, url, focus_keyword, &Options::default())
}

/// Analyzes an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_seo_audit::{analyze_with_options, Options};
///
/// let html = format!("<html><body><p>{}</p></body></html>", "Nội dung trang. ".repeat(10));
/// let options = Options {
///     keyword_limit: 5,
///     ..Options::default()
/// };
/// let result = analyze_with_options(&html, "https://example.vn/", None, &options)?;
/// assert!(result.signals.keywords.phrases.len() <= 5);
/// # Ok::<(), rs_seo_audit::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn analyze_with_options(
    html: &str,
    url: &str,
    focus_keyword: Option<&str>,
    options: &Options,
) -> Result<AnalysisResult> {
    analyze_request(
        &AnalysisRequest::new(html, url).with_focus_keyword(focus_keyword),
        options,
    )
}

/// Analyzes a request that may carry site probe results.
#[allow(clippy::missing_errors_doc)]
pub fn analyze_request(request: &AnalysisRequest<'_>, options: &Options) -> Result<AnalysisResult> {
    analyze::run(
        &analyze::PageInput {
            html: request.html,
            url: request.url,
            focus_keyword: request.focus_keyword,
            site: request.site,
        },
        options,
    )
}

/// Analyzes HTML bytes with automatic encoding detection.
///
/// The encoding is taken from `<meta charset>` or
/// `<meta http-equiv="Content-Type">` and defaults to UTF-8. Malformed
/// sequences are replaced with U+FFFD and reported as a warning.
///
/// # Example
///
/// ```rust
/// use rs_seo_audit::{analyze_bytes, AnalysisRequest, Options};
///
/// let mut html = b"<html><head><meta charset=\"windows-1258\"></head><body><p>".to_vec();
/// html.extend(b"Caf\xE9 ".repeat(40));
/// html.extend(b"</p></body></html>");
///
/// let result = analyze_bytes(&html, AnalysisRequest::new("", "https://example.vn/"), &Options::default())?;
/// assert_eq!(result.encoding, Some("windows-1258"));
/// # Ok::<(), rs_seo_audit::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn analyze_bytes(
    html: &[u8],
    request: AnalysisRequest<'_>,
    options: &Options,
) -> Result<AnalysisResult> {
    let decoded = encoding::decode_html(html);
    let mut result = analyze_request(
        &AnalysisRequest {
            html: &decoded.text,
            ..request
        },
        options,
    )?;

    result.encoding = Some(decoded.encoding);
    if decoded.had_errors {
        result.warnings.push(format!(
            "page contains byte sequences that are invalid in {}",
            decoded.encoding
        ));
    }
    Ok(result)
}

/// Merges performance metrics into a result and returns it.
///
/// Merging the same metrics twice gives the same score as merging once.
/// See [`AnalysisResult::merge_performance_metrics`].
#[must_use]
pub fn merge_performance_metrics(
    mut result: AnalysisResult,
    metrics: PerformanceMetrics,
) -> AnalysisResult {
    result.merge_performance_metrics(metrics);
    result
}
