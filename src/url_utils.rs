//! URL Utility Functions
//!
//! Page URL validation, host normalization for internal/external link
//! classification, link resolution, and the key used by the analysis cache.

use url::Url;

use crate::error::{Error, Result};

/// Validate the URL of the page under analysis.
///
/// The URL must be non-empty, parse, use `http` or `https`, and carry a host.
/// Anything else is rejected with `Error::InvalidUrl` (code `E001`).
pub fn parse_page_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidUrl("URL is empty".to_string()));
    }

    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "{raw}: unsupported scheme {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidUrl(format!("{raw}: missing host")));
    }

    Ok(url)
}

/// Lowercase a host and drop one leading `www.`.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => host,
    }
}

/// Whether `url` lives on the same site as `page_host`, ignoring `www.`.
#[must_use]
pub fn is_same_site(url: &Url, page_host: &str) -> bool {
    url.host_str()
        .is_some_and(|host| normalize_host(host) == normalize_host(page_host))
}

/// Resolve an `href` against the page URL.
///
/// Returns `None` for empty references and for schemes that never point at
/// a page (`javascript:`, `mailto:`, `tel:`, `data:`).
#[must_use]
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let lower = href.to_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    base.join(href)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// The same URL on the other host variant (`www.` added or removed).
#[must_use]
pub fn toggle_www(url: &Url) -> Option<Url> {
    let host = url.host_str()?;
    let other = match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => format!("www.{host}"),
    };

    let mut toggled = url.clone();
    toggled.set_host(Some(&other)).ok()?;
    Some(toggled)
}

/// Key under which an analysis is cached: trimmed and lowercased.
#[must_use]
pub fn cache_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// File name of an image source, without query string or fragment.
#[must_use]
pub fn filename_from_src(src: &str) -> String {
    let without_query = src.split(['?', '#']).next().unwrap_or_default();
    without_query
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
