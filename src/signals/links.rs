//! Page-local link graph.
//!
//! Every anchor of the main content is resolved against the page URL and
//! classified as internal (same host, `www.` ignored) or external. Internal
//! anchors are also compared against the top keyword to detect exact-match
//! over-optimization and generic anchor text.

use serde::Serialize;
use url::Url;

use crate::dom::{self, Document, Selection};
use crate::error::{Error, Result};
use crate::patterns::GENERIC_ANCHOR;
use crate::url_utils::{is_same_site, resolve_link};

/// Exact-match anchors allowed before further ones count as over-optimized.
const EXACT_MATCH_ALLOWANCE: usize = 3;

/// Where a link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Same site as the page.
    Internal,
    /// Another site.
    External,
    /// Empty, script or non-web reference.
    Unresolved,
}

/// Relation of an anchor text to the top keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMatch {
    /// Equals the keyword.
    Exact,
    /// Contains the keyword.
    Partial,
    /// "click here", "read more", ...
    Generic,
}

/// One anchor of the main content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkFacts {
    /// `href` as written.
    pub href: String,
    /// Resolved absolute URL for web links.
    pub resolved: Option<String>,
    /// Trimmed anchor text.
    pub text: String,
    /// Internal, external or unresolved.
    pub kind: LinkKind,
    /// `rel` contains `nofollow`.
    pub nofollow: bool,
    /// `rel` contains `noopener` or `noreferrer`.
    pub safe_rel: bool,
    /// `target="_blank"` without `noopener`/`noreferrer`.
    pub unsafe_blank: bool,
    /// Empty, `#` or `javascript:void(0)` href.
    pub empty: bool,
    /// Internal link with a non-empty query string and no `nofollow`.
    pub dynamic: bool,
    /// Anchor-text classification, internal links only.
    pub anchor: Option<AnchorMatch>,
}

/// All anchors of the main content with aggregate counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkGraph {
    /// Anchors in document order.
    pub links: Vec<LinkFacts>,
    /// Exact-match anchor texts beyond the allowance, in document order.
    pub over_optimized: Vec<String>,
}

impl LinkGraph {
    fn count(&self, predicate: impl Fn(&LinkFacts) -> bool) -> usize {
        self.links.iter().filter(|link| predicate(link)).count()
    }

    /// Internal links.
    #[must_use]
    pub fn internal(&self) -> usize {
        self.count(|l| l.kind == LinkKind::Internal)
    }

    /// External links.
    #[must_use]
    pub fn external(&self) -> usize {
        self.count(|l| l.kind == LinkKind::External)
    }

    /// Links with `rel="nofollow"`.
    #[must_use]
    pub fn nofollow(&self) -> usize {
        self.count(|l| l.nofollow)
    }

    /// `target="_blank"` links missing `noopener`/`noreferrer`.
    #[must_use]
    pub fn unsafe_blank(&self) -> usize {
        self.count(|l| l.unsafe_blank)
    }

    /// Empty or placeholder hrefs.
    #[must_use]
    pub fn empty(&self) -> usize {
        self.count(|l| l.empty)
    }

    /// Internal links carrying query parameters.
    #[must_use]
    pub fn dynamic(&self) -> usize {
        self.count(|l| l.dynamic)
    }

    /// Internal anchors classified as `kind`.
    #[must_use]
    pub fn anchors(&self, kind: AnchorMatch) -> usize {
        self.count(|l| l.anchor == Some(kind))
    }
}

/// Collect the link graph of the main content.
///
/// Fails only when the page URL has no host to compare against.
pub fn collect(content: &Document, page_url: &Url, top_keyword: Option<&str>) -> Result<LinkGraph> {
    let page_host = page_url.host_str().ok_or_else(|| Error::Collector {
        collector: "links",
        reason: format!("page URL {page_url} has no host"),
    })?;
    let keyword = top_keyword
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty());

    let mut graph = LinkGraph::default();
    let mut exact_matches = 0;

    for anchor in content.select("a").iter() {
        let mut link = inspect(&anchor, page_url, page_host);

        if link.kind == LinkKind::Internal && !link.text.is_empty() {
            link.anchor = classify_anchor(&link.text, keyword.as_deref());
            if link.anchor == Some(AnchorMatch::Exact) {
                exact_matches += 1;
                if exact_matches > EXACT_MATCH_ALLOWANCE {
                    graph.over_optimized.push(link.text.clone());
                }
            }
        }

        graph.links.push(link);
    }

    Ok(graph)
}

fn inspect(anchor: &Selection, page_url: &Url, page_host: &str) -> LinkFacts {
    let href = dom::get_attribute(anchor, "href")
        .map(|h| h.trim().to_string())
        .unwrap_or_default();
    let rel = dom::rel(anchor);
    let nofollow = rel.contains("nofollow");
    let safe_rel = rel.contains("noopener") || rel.contains("noreferrer");
    let blank = dom::get_attribute(anchor, "target").is_some_and(|t| t.eq_ignore_ascii_case("_blank"));

    let resolved = resolve_link(&href, page_url);
    let kind = match &resolved {
        Some(url) if is_same_site(url, page_host) => LinkKind::Internal,
        Some(_) => LinkKind::External,
        None => LinkKind::Unresolved,
    };
    let dynamic = kind == LinkKind::Internal
        && !nofollow
        && resolved
            .as_ref()
            .and_then(Url::query)
            .is_some_and(|q| !q.is_empty());

    LinkFacts {
        empty: href.is_empty() || href == "#" || href.eq_ignore_ascii_case("javascript:void(0)"),
        resolved: resolved.map(|u| u.to_string()),
        text: dom::trimmed_text(anchor),
        unsafe_blank: blank && !safe_rel,
        href,
        kind,
        nofollow,
        safe_rel,
        dynamic,
        anchor: None,
    }
}

fn classify_anchor(text: &str, keyword: Option<&str>) -> Option<AnchorMatch> {
    let lower = text.to_lowercase();
    match keyword {
        Some(kw) if lower == kw => Some(AnchorMatch::Exact),
        Some(kw) if lower.contains(kw) => Some(AnchorMatch::Partial),
        _ if GENERIC_ANCHOR.is_match(text) => Some(AnchorMatch::Generic),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn graph(html: &str, keyword: Option<&str>) -> LinkGraph {
        let page = Url::parse("https://www.example.vn/may-tinh/").expect("valid url");
        collect(&dom::parse(html), &page, keyword).expect("collect")
    }

    #[test]
    fn test_internal_external_classification() {
        let g = graph(
            r#"<a href="/lien-he">Liên hệ</a>
               <a href="https://example.vn/gioi-thieu">Giới thiệu</a>
               <a href="phu-kien">Phụ kiện</a>
               <a href="https://vi.wikipedia.org/wiki/M%C3%A1y_t%C3%ADnh">Wikipedia</a>
               <a href="mailto:hi@example.vn">Email</a>"#,
            None,
        );

        assert_eq!(g.internal(), 3);
        assert_eq!(g.external(), 1);
        assert_eq!(g.links[4].kind, LinkKind::Unresolved);
    }

    #[test]
    fn test_rel_flags() {
        let g = graph(
            r##"<a href="https://other.vn" target="_blank">Unsafe</a>
               <a href="https://other.vn" target="_blank" rel="noopener">Safe</a>
               <a href="https://other.vn" rel="nofollow sponsored">Sponsored</a>
               <a href="#">Top</a>
               <a href="javascript:void(0)">Menu</a>"##,
            None,
        );

        assert_eq!(g.unsafe_blank(), 1);
        assert_eq!(g.nofollow(), 1);
        assert_eq!(g.empty(), 2);
        assert_eq!(g.links[3].kind, LinkKind::Internal);
    }

    #[test]
    fn test_dynamic_parameters_skip_nofollow() {
        let g = graph(
            r#"<a href="/tim-kiem?q=laptop">Tìm</a>
               <a href="/loc?gia=re" rel="nofollow">Lọc</a>
               <a href="/trang?">Trang</a>"#,
            None,
        );
        assert_eq!(g.dynamic(), 1);
    }

    #[test]
    fn test_anchor_classification_against_keyword() {
        let g = graph(
            r#"<a href="/a">Máy tính</a>
               <a href="/b">Máy Tính văn phòng</a>
               <a href="/c">Xem thêm</a>
               <a href="/d">Click here for details</a>
               <a href="https://other.vn">máy tính</a>"#,
            Some("máy tính"),
        );

        assert_eq!(g.anchors(AnchorMatch::Exact), 1);
        assert_eq!(g.anchors(AnchorMatch::Partial), 1);
        assert_eq!(g.anchors(AnchorMatch::Generic), 2);
        assert!(g.links[4].anchor.is_none());
    }

    #[test]
    fn test_over_optimized_after_three_exact_matches() {
        let html = (0..5)
            .map(|i| format!(r#"<a href="/p{i}">máy tính</a>"#))
            .collect::<String>();
        let g = graph(&html, Some("Máy tính"));

        assert_eq!(g.anchors(AnchorMatch::Exact), 5);
        assert_eq!(g.over_optimized.len(), 2);
    }

    #[test]
    fn test_page_without_host_fails() {
        let page = Url::parse("data:text/html,hello").expect("valid url");
        let err = collect(&dom::parse("<a href='/x'>x</a>"), &page, None).expect_err("no host");
        assert!(matches!(err, Error::Collector { collector: "links", .. }));
    }
}
