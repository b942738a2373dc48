//! E-E-A-T and breadcrumb signals.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::dom::{self, Document};
use crate::signals::structured_data::{entities, parse_blocks, schema_types};
use crate::url_utils::resolve_link;

const PUBLISHED_DATE: &str =
    r#"meta[property="article:published_time"], time[datetime], [itemprop="datePublished"]"#;
const MODIFIED_DATE: &str =
    r#"meta[property="article:modified_time"], time[datetime], [itemprop="dateModified"]"#;
const AUTHOR_BIO: &str = r#".author-bio, .author-info, [class*="author"], [id*="author"]"#;
const BREADCRUMB_NAV: &str =
    r#"nav[aria-label*="breadcrumb"], .breadcrumb, .breadcrumbs, [class*="breadcrumb"]"#;

/// Author bio text must be longer than this to count.
const MIN_AUTHOR_BIO_CHARS: usize = 50;

/// Trust signals of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrustSignals {
    /// JSON-LD declares a `Person`/`Author`, or an entity's `author` does.
    pub author_schema: bool,
    pub published_date: bool,
    pub modified_date: bool,
    /// Content links to about or contact pages.
    pub about_contact_links: usize,
    /// Content links to `.edu`, `.gov`, `.org`, Wikipedia or research hosts.
    pub citation_links: usize,
    /// Trimmed text length of author bio blocks.
    pub author_bio_chars: usize,
    /// A `BreadcrumbList` entity exists.
    pub breadcrumb_schema: bool,
    /// Breadcrumb navigation markup exists.
    pub breadcrumb_nav: bool,
}

impl TrustSignals {
    #[must_use]
    pub fn has_author_bio(&self) -> bool {
        self.author_bio_chars > MIN_AUTHOR_BIO_CHARS
    }

    /// E-E-A-T points, rounded to a whole number (0 to 6).
    #[must_use]
    pub fn eeat_points(&self) -> f64 {
        let mut points = 0.0;
        if self.author_schema {
            points += 2.0;
        }
        if self.published_date {
            points += 1.0;
        }
        if self.modified_date {
            points += 0.5;
        }
        if self.about_contact_links > 0 {
            points += 0.5;
        }
        points += match self.citation_links {
            0 => 0.0,
            1 => 0.5,
            _ => 1.5,
        };
        if self.has_author_bio() {
            points += 0.5;
        }
        f64::round(points)
    }

    /// 2 with `BreadcrumbList` schema, 1 with markup only.
    #[must_use]
    pub fn breadcrumb_points(&self) -> f64 {
        if self.breadcrumb_schema {
            2.0
        } else if self.breadcrumb_nav {
            1.0
        } else {
            0.0
        }
    }
}

/// Collect trust signals. Dates, bios, breadcrumbs and schema are read from
/// the whole page; about/contact and citation links from the main content.
#[must_use]
pub fn collect(page: &Document, content: &Document, page_url: &Url) -> TrustSignals {
    let blocks = parse_blocks(page);
    let mut author_schema = false;
    let mut breadcrumb_schema = false;

    for block in &blocks {
        for (_, entity) in entities(block) {
            let types = schema_types(entity);
            author_schema |= types.iter().any(|t| is_author_type(t))
                || entity.get("author").is_some_and(is_author_value);
            breadcrumb_schema |= types.iter().any(|t| t == "BreadcrumbList");
        }
    }

    let mut about_contact_links = 0;
    let mut citation_links = 0;
    for anchor in content.select("a").iter() {
        let href = dom::get_attribute(&anchor, "href").unwrap_or_default();
        let text = dom::text_content(&anchor).to_lowercase();
        if is_about_or_contact(&href.to_lowercase(), &text) {
            about_contact_links += 1;
        }
        if resolve_link(&href, page_url)
            .and_then(|url| url.host_str().map(str::to_lowercase))
            .is_some_and(|host| is_authoritative_host(&host))
        {
            citation_links += 1;
        }
    }

    let bio = page.select(AUTHOR_BIO);
    TrustSignals {
        author_schema,
        published_date: page.select(PUBLISHED_DATE).exists(),
        modified_date: page.select(MODIFIED_DATE).exists(),
        about_contact_links,
        citation_links,
        author_bio_chars: if bio.exists() {
            bio.text().trim().chars().count()
        } else {
            0
        },
        breadcrumb_schema,
        breadcrumb_nav: page.select(BREADCRUMB_NAV).exists(),
    }
}

fn is_author_type(schema_type: &str) -> bool {
    schema_type == "Person" || schema_type == "Author"
}

/// `author` given as an object or an array of objects typed `Person`/`Author`.
fn is_author_value(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .get("@type")
            .and_then(Value::as_str)
            .is_some_and(is_author_type),
        Value::Array(items) => items.iter().any(is_author_value),
        _ => false,
    }
}

fn is_about_or_contact(href: &str, text: &str) -> bool {
    href.contains("about")
        || href.contains("contact")
        || ["về chúng tôi", "about us", "liên hệ", "contact us"]
            .iter()
            .any(|phrase| text.contains(phrase))
}

/// Institutional TLDs, including their Vietnamese second-level forms
/// (`.edu.vn`, `.gov.vn`, `.org.vn`), plus reference and research hosts.
fn is_authoritative_host(host: &str) -> bool {
    let institutional = host
        .rsplit('.')
        .take(2)
        .any(|label| matches!(label, "edu" | "gov" | "org"));
    institutional || ["wikipedia", "research", "study"].iter().any(|s| host.contains(s))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn signals(head: &str, body: &str) -> TrustSignals {
        let page = dom::parse(&format!("<html><head>{head}</head><body>{body}</body></html>"));
        let content = dom::parse(body);
        let url = Url::parse("https://example.vn/bai-viet").expect("valid url");
        collect(&page, &content, &url)
    }

    #[test]
    fn test_full_eeat_profile() {
        let s = signals(
            r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Article","author":{"@type":"Person","name":"An"}}</script>
               <meta property="article:published_time" content="2024-05-01">
               <meta property="article:modified_time" content="2024-06-01">"#,
            r#"<p>Theo <a href="https://www.gso.gov.vn/so-lieu">Tổng cục Thống kê</a> và
               <a href="https://vi.wikipedia.org/wiki/Thuế">Wikipedia</a>.</p>
               <a href="/lien-he">Liên hệ</a>
               <div class="author-bio">Nguyễn Văn An là chuyên gia tài chính với hơn mười năm kinh nghiệm.</div>"#,
        );

        assert!(s.author_schema);
        assert!(s.published_date && s.modified_date);
        assert_eq!(s.citation_links, 2);
        assert_eq!(s.about_contact_links, 1);
        assert!(s.has_author_bio());
        // 2 + 1 + 0.5 + 0.5 + 1.5 + 0.5 = 6
        assert_eq!(s.eeat_points(), 6.0);
    }

    #[test]
    fn test_eeat_rounds_half_points() {
        let s = TrustSignals {
            published_date: true,
            modified_date: true,
            ..TrustSignals::default()
        };
        assert_eq!(s.eeat_points(), 2.0);

        let s = TrustSignals {
            citation_links: 1,
            ..TrustSignals::default()
        };
        assert_eq!(s.eeat_points(), 1.0);
    }

    #[test]
    fn test_time_element_counts_as_both_dates() {
        let s = signals("", r#"<time datetime="2024-05-01">1/5</time>"#);
        assert!(s.published_date);
        assert!(s.modified_date);
    }

    #[test]
    fn test_short_bio_does_not_count() {
        let s = signals("", r#"<div id="author">An</div>"#);
        assert!(!s.has_author_bio());
        assert_eq!(s.eeat_points(), 0.0);
    }

    #[test]
    fn test_breadcrumbs() {
        let schema = signals(
            r#"<script type="application/ld+json">{"@context":"https://schema.org","@graph":[{"@type":"BreadcrumbList","itemListElement":[]}]}</script>"#,
            "",
        );
        assert_eq!(schema.breadcrumb_points(), 2.0);

        let nav = signals("", r#"<nav aria-label="breadcrumb"><a href="/">Trang chủ</a></nav>"#);
        assert_eq!(nav.breadcrumb_points(), 1.0);

        assert_eq!(signals("", "<p>x</p>").breadcrumb_points(), 0.0);
    }

    #[test]
    fn test_authoritative_hosts() {
        assert!(is_authoritative_host("mit.edu"));
        assert!(is_authoritative_host("chinhphu.gov.vn"));
        assert!(is_authoritative_host("en.wikipedia.org"));
        assert!(!is_authoritative_host("example.vn"));
        assert!(!is_authoritative_host("organic.vn"));
    }
}
