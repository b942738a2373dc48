//! Two-stage audit session.
//!
//! Stage one fetches the page, validates it and produces the primary
//! result, which goes to the [`ReportSink`] before anything else happens.
//! Stage two asks the [`MetricsSource`] for Core Web Vitals under a
//! deadline and merges them into that same result. A failed or late
//! stage two leaves the primary score untouched and marks performance
//! unavailable.
//!
//! Network access belongs to the caller: the session only consumes the
//! [`PageSource`] and [`MetricsSource`] contracts.

mod cache;
mod rate_limit;

pub use cache::AnalysisCache;
pub use rate_limit::RateLimiter;

use tokio::sync::Mutex;
use tokio::time::{timeout, Instant};
use url::Url;

use crate::error::{Error, Result};
use crate::report::ReportSink;
use crate::result::AnalysisResult;
use crate::scoring::PerformanceMetrics;
use crate::signals::site::{WwwProbe, SITEMAP_PATHS};
use crate::signals::SiteProbes;
use crate::url_utils::{cache_key, parse_page_url, toggle_www};
use crate::{AnalysisRequest, Options};

/// Bytes of the body sniffed for HTML markers.
const SNIFF_LEN: usize = 200;

const HTML_MARKERS: &[&str] = &["<html", "<!doctype", "<head", "<body"];

/// A fetched response as handed over by the boundary.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Reject responses that must not be analyzed.
    ///
    /// Checked in order: status, size, HTML sniffing. The minimum-length
    /// check runs on the decoded text during analysis.
    pub fn validate(&self, options: &Options) -> Result<()> {
        match self.status {
            200..=299 => {}
            404 => return Err(Error::NotFound),
            403 => return Err(Error::Forbidden),
            status => return Err(Error::FetchFailed(format!("HTTP status {status}"))),
        }

        if self.body.len() > options.max_content_bytes {
            return Err(Error::ContentTooLarge {
                size: self.body.len(),
                limit: options.max_content_bytes,
            });
        }

        if !looks_like_html(self.content_type.as_deref(), &self.body) {
            return Err(Error::NotHtml(
                self.content_type
                    .clone()
                    .unwrap_or_else(|| "no content type".to_string()),
            ));
        }

        Ok(())
    }
}

/// Content type mentions html, or the start of the body carries an HTML
/// marker.
#[must_use]
pub fn looks_like_html(content_type: Option<&str>, body: &[u8]) -> bool {
    if content_type.is_some_and(|ct| ct.to_lowercase().contains("html")) {
        return true;
    }
    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LEN)]).to_lowercase();
    HTML_MARKERS.iter().any(|marker| head.contains(marker))
}

/// Fetches pages and probes their site.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage>;

    /// robots.txt, sitemap and www/non-www probes.
    ///
    /// The default issues the probes through [`PageSource::fetch_page`]; a
    /// probe counts as present when its response is 2xx.
    async fn probe_site(&self, url: &Url) -> SiteProbes {
        let robots_txt = match url.join("/robots.txt") {
            Ok(target) => self.answers(&target).await,
            Err(_) => false,
        };

        let mut sitemap = false;
        for path in SITEMAP_PATHS {
            if let Ok(target) = url.join(path) {
                if self.answers(&target).await {
                    sitemap = true;
                    break;
                }
            }
        }

        let www = match toggle_www(url) {
            Some(other) => {
                let other_exists = self.answers(&other).await;
                let is_www = url.host_str().is_some_and(|h| h.starts_with("www."));
                Some(WwwProbe {
                    www_exists: is_www || other_exists,
                    non_www_exists: !is_www || other_exists,
                })
            }
            None => None,
        };

        SiteProbes {
            robots_txt: Some(robots_txt),
            sitemap: Some(sitemap),
            www,
        }
    }

    /// Whether `url` answers with a 2xx status.
    async fn answers(&self, url: &Url) -> bool {
        match self.fetch_page(url).await {
            Ok(page) => (200..300).contains(&page.status),
            Err(e) => {
                log::debug!("probe {url} failed: {e}");
                false
            }
        }
    }
}

/// Fetches Core Web Vitals for a page.
#[allow(async_fn_in_trait)]
pub trait MetricsSource {
    async fn fetch_metrics(&self, url: &Url) -> Result<PerformanceMetrics>;
}

/// Runs audits for one boundary, with its cache and rate limiter.
///
/// Audits on one session run independently of each other. The cache and
/// limiter locks are only taken around their synchronous calls.
pub struct AuditSession<P, M> {
    pages: P,
    metrics: M,
    options: Options,
    cache: Mutex<AnalysisCache>,
    limiter: Mutex<RateLimiter>,
}

impl<P: PageSource, M: MetricsSource> AuditSession<P, M> {
    pub fn new(pages: P, metrics: M, options: Options) -> Self {
        Self {
            cache: Mutex::new(AnalysisCache::new(options.cache_ttl())),
            limiter: Mutex::new(RateLimiter::new(
                options.rate_limit_requests,
                options.rate_limit_window(),
            )),
            pages,
            metrics,
            options,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Mutex<AnalysisCache> {
        &self.cache
    }

    /// Audit `url` on behalf of `client`.
    ///
    /// The primary result reaches `sink` before metrics are requested. The
    /// returned result is the updated one.
    ///
    /// # Errors
    ///
    /// `E011` when `client` is over its budget, `E001` for an invalid URL,
    /// and any error of the page fetch or its validation. Metrics failures
    /// are not errors.
    pub async fn run<S: ReportSink + ?Sized>(
        &self,
        client: &str,
        url: &str,
        focus_keyword: Option<&str>,
        sink: &mut S,
    ) -> Result<AnalysisResult> {
        self.limiter.lock().await.check(client, Instant::now())?;
        let page_url = parse_page_url(url)?;

        let mut result = self.primary(&page_url, url, focus_keyword).await?;
        sink.primary(&result);

        let deadline = self.options.metrics_timeout();
        match timeout(deadline, self.metrics.fetch_metrics(&page_url)).await {
            Ok(Ok(metrics)) => result.merge_performance_metrics(metrics),
            Ok(Err(e)) => result.mark_performance_unavailable(e.to_string()),
            Err(_) => result.mark_performance_unavailable(Error::Timeout(deadline).to_string()),
        }
        sink.updated(&result);

        Ok(result)
    }

    async fn primary(
        &self,
        page_url: &Url,
        url: &str,
        focus_keyword: Option<&str>,
    ) -> Result<AnalysisResult> {
        let key = match focus_keyword.map(str::trim).filter(|k| !k.is_empty()) {
            Some(keyword) => format!("{}#{}", cache_key(url), keyword.to_lowercase()),
            None => cache_key(url),
        };

        let hit = self.cache.lock().await.get(&key, Instant::now()).cloned();
        if let Some(hit) = hit {
            log::debug!("cache hit for {key}");
            return Ok(hit);
        }

        let page = self.pages.fetch_page(page_url).await?;
        page.validate(&self.options)?;
        let site = self.pages.probe_site(page_url).await;

        let request = AnalysisRequest::new("", url)
            .with_focus_keyword(focus_keyword)
            .with_site_probes(site);
        let result = crate::analyze_bytes(&page.body, request, &self.options)?;

        self.cache
            .lock()
            .await
            .insert(key, result.clone(), Instant::now());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(status: u16, content_type: Option<&str>, body: &str) -> FetchedPage {
        FetchedPage {
            status,
            content_type: content_type.map(str::to_string),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_status_codes() {
        let options = Options::default();
        let body = "<html><body>ok</body></html>";

        assert!(matches!(page(404, None, body).validate(&options), Err(Error::NotFound)));
        assert!(matches!(page(403, None, body).validate(&options), Err(Error::Forbidden)));
        let err = page(500, None, body).validate(&options);
        assert_eq!(err.map_err(|e| e.code()), Err("E003"));
        assert!(page(200, None, body).validate(&options).is_ok());
    }

    #[test]
    fn test_html_sniffing() {
        assert!(looks_like_html(Some("text/html; charset=utf-8"), b""));
        assert!(looks_like_html(None, b"  <!DOCTYPE html><p>"));
        assert!(looks_like_html(Some("text/plain"), b"<HEAD><title>x</title>"));
        assert!(!looks_like_html(Some("application/json"), br#"{"html": false}"#));

        let err = page(200, Some("application/json"), "{}").validate(&Options::default());
        assert_eq!(err.map_err(|e| e.code()), Err("E005"));
    }

    #[test]
    fn test_oversized_body() {
        let options = Options {
            max_content_bytes: 16,
            ..Options::default()
        };
        let err = page(200, Some("text/html"), "<html><body>0123456789</body></html>")
            .validate(&options);
        assert_eq!(err.map_err(|e| e.code()), Err("E004"));
    }
}
