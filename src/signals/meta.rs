//! Page-level meta facts.
//!
//! Reads `<title>`, the standard and social `<meta>` tags, and the `<link>`
//! relations that matter for indexing (canonical, icon, hreflang alternates,
//! pagination) from the whole page, not just the main-content region.

use serde::Serialize;

use crate::dom::{self, Document};

/// Open Graph fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    /// `og:title`
    pub title: Option<String>,
    /// `og:description`
    pub description: Option<String>,
    /// `og:image`
    pub image: Option<String>,
    /// `og:url`
    pub url: Option<String>,
}

/// Twitter Card fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    /// `twitter:card`
    pub card: Option<String>,
    /// `twitter:title`
    pub title: Option<String>,
    /// `twitter:description`
    pub description: Option<String>,
    /// `twitter:image`
    pub image: Option<String>,
    /// `twitter:site`
    pub site: Option<String>,
    /// `twitter:creator`
    pub creator: Option<String>,
}

/// One `<link rel="alternate" hreflang="...">` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HreflangEntry {
    /// Language-region code, or `x-default`.
    pub lang: String,
    /// Target URL.
    pub href: String,
}

/// `rel="next"` / `rel="prev"` links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Next page.
    pub next: Option<String>,
    /// Previous page.
    pub prev: Option<String>,
}

/// Flat record of page-level facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaFacts {
    /// Trimmed text of the first `<title>`, empty when missing.
    pub title: String,
    /// `<meta name="description">`, empty when missing.
    pub meta_description: String,
    /// `<meta name="keywords">`, empty when missing.
    pub meta_keywords: String,
    /// Canonical URL.
    pub canonical: Option<String>,
    /// Robots directive.
    pub robots: Option<String>,
    /// Viewport declaration.
    pub viewport: Option<String>,
    /// Declared charset.
    pub charset: Option<String>,
    /// `<html lang>`.
    pub language: Option<String>,
    /// Favicon URL.
    pub favicon: Option<String>,
    /// Open Graph tags.
    pub open_graph: OpenGraph,
    /// Twitter Card tags.
    pub twitter: TwitterCard,
    /// Hreflang alternates in document order.
    pub hreflang: Vec<HreflangEntry>,
    /// Pagination relations.
    pub pagination: Pagination,
}

impl MetaFacts {
    /// Title length in characters.
    #[must_use]
    pub fn title_length(&self) -> usize {
        self.title.chars().count()
    }

    /// Meta description length in characters.
    #[must_use]
    pub fn description_length(&self) -> usize {
        self.meta_description.chars().count()
    }
}

/// Collect meta facts from the page.
#[must_use]
pub fn collect(page: &Document) -> MetaFacts {
    let mut facts = MetaFacts {
        title: title(page),
        language: dom::non_empty_attribute(&page.select("html"), "lang"),
        ..MetaFacts::default()
    };

    examine_meta(page, &mut facts);
    examine_links(page, &mut facts);
    facts
}

fn title(page: &Document) -> String {
    let head_title = page.select("head title").first();
    let title = if head_title.exists() {
        head_title
    } else {
        page.select("title").first()
    };
    dom::trimmed_text(&title)
}

/// Route every `<meta>` tag by its `name` / `property` key. The first
/// occurrence of each key wins.
fn examine_meta(page: &Document, facts: &mut MetaFacts) {
    for meta in page.select("meta").iter() {
        if facts.charset.is_none() {
            if let Some(charset) = dom::non_empty_attribute(&meta, "charset") {
                facts.charset = Some(charset);
                continue;
            }
        }

        let content = dom::get_attribute(&meta, "content")
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if let Some(equiv) = dom::get_attribute(&meta, "http-equiv") {
            if equiv.eq_ignore_ascii_case("content-type") && facts.charset.is_none() {
                facts.charset = charset_from_content_type(&content);
            }
            continue;
        }

        let key = dom::get_attribute(&meta, "name")
            .or_else(|| dom::get_attribute(&meta, "property"))
            .unwrap_or_default()
            .to_lowercase();

        if key.is_empty() || content.is_empty() {
            continue;
        }

        let slot = match key.as_str() {
            "description" => {
                set_text(&mut facts.meta_description, content);
                continue;
            }
            "keywords" => {
                set_text(&mut facts.meta_keywords, content);
                continue;
            }
            "robots" => &mut facts.robots,
            "viewport" => &mut facts.viewport,
            "og:title" => &mut facts.open_graph.title,
            "og:description" => &mut facts.open_graph.description,
            "og:image" => &mut facts.open_graph.image,
            "og:url" => &mut facts.open_graph.url,
            "twitter:card" => &mut facts.twitter.card,
            "twitter:title" => &mut facts.twitter.title,
            "twitter:description" => &mut facts.twitter.description,
            "twitter:image" => &mut facts.twitter.image,
            "twitter:site" => &mut facts.twitter.site,
            "twitter:creator" => &mut facts.twitter.creator,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(content);
        }
    }
}

fn set_text(slot: &mut String, value: String) {
    if slot.is_empty() {
        *slot = value;
    }
}

fn charset_from_content_type(content: &str) -> Option<String> {
    let lower = content.to_ascii_lowercase();
    let charset = match lower.find("charset=") {
        Some(pos) => content[pos + "charset=".len()..].trim(),
        None => content.trim(),
    };
    (!charset.is_empty()).then(|| charset.to_string())
}

fn examine_links(page: &Document, facts: &mut MetaFacts) {
    for link in page.select("link[rel]").iter() {
        let rel = dom::rel(&link);
        let tokens: Vec<&str> = rel.split_whitespace().collect();
        let href = dom::non_empty_attribute(&link, "data-original-href")
            .or_else(|| dom::non_empty_attribute(&link, "href"));
        let Some(href) = href else {
            continue;
        };

        if tokens.contains(&"canonical") && facts.canonical.is_none() {
            facts.canonical = Some(href.clone());
        }
        if tokens.contains(&"icon") && facts.favicon.is_none() {
            facts.favicon = Some(href.clone());
        }
        if tokens.contains(&"next") && facts.pagination.next.is_none() {
            facts.pagination.next = Some(href.clone());
        }
        if tokens.contains(&"prev") && facts.pagination.prev.is_none() {
            facts.pagination.prev = Some(href.clone());
        }
        if tokens.contains(&"alternate") {
            if let Some(lang) = dom::non_empty_attribute(&link, "hreflang") {
                facts.hreflang.push(HreflangEntry { lang, href });
            }
        }
    }
}
