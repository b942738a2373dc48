//! Recommendation generator.
//!
//! Findings go into three buckets by expected SEO impact and the buckets are
//! concatenated in order: critical, important, optional. Within a bucket
//! the order is the order the checks run in; nothing is re-sorted.

use serde::Serialize;

use crate::scoring::performance::{CLS_GOOD, INP_GOOD_MS, LCP_GOOD_SECS};
use crate::scoring::PerformanceState;
use crate::signals::images::ImageFacts;
use crate::signals::links::AnchorMatch;
use crate::signals::Signals;

/// Keyword density band, in percent.
const DENSITY_MIN: f64 = 0.5;
const DENSITY_MAX: f64 = 2.5;

/// Bucket of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Large ranking impact.
    Critical,
    /// Small ranking impact.
    Important,
    /// No direct ranking impact.
    Optional,
}

impl Priority {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Important => "Important",
            Self::Optional => "Optional",
        }
    }
}

/// One remediation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    /// Stable identifier of the check that produced it.
    pub rule: &'static str,
    pub text: String,
}

#[derive(Default)]
struct Buckets {
    critical: Vec<Recommendation>,
    important: Vec<Recommendation>,
    optional: Vec<Recommendation>,
}

impl Buckets {
    fn push(&mut self, priority: Priority, rule: &'static str, text: impl Into<String>) {
        let bucket = match priority {
            Priority::Critical => &mut self.critical,
            Priority::Important => &mut self.important,
            Priority::Optional => &mut self.optional,
        };
        bucket.push(Recommendation {
            priority,
            rule,
            text: text.into(),
        });
    }

    fn into_list(self) -> Vec<Recommendation> {
        let mut list = self.critical;
        list.extend(self.important);
        list.extend(self.optional);
        list
    }
}

/// Generate recommendations for one analysis.
#[must_use]
pub fn generate(signals: &Signals, performance: &PerformanceState) -> Vec<Recommendation> {
    let mut out = Buckets::default();

    on_page(signals, &mut out);
    keyword(signals, &mut out);
    content(signals, &mut out);
    technical(signals, &mut out);
    structured_data(signals, &mut out);
    mobile(signals, &mut out);
    images(signals, &mut out);
    anchors(signals, &mut out);
    trust(signals, &mut out);
    international(signals, &mut out);
    site(signals, &mut out);
    speed(performance, &mut out);
    markup(signals, &mut out);

    out.into_list()
}

fn on_page(s: &Signals, out: &mut Buckets) {
    use Priority::Critical;

    match s.meta.title_length() {
        0..=29 => out.push(Critical, "title_short", "Add or improve the title tag (recommended: 30-60 characters)"),
        61.. => out.push(Critical, "title_long", "Shorten the title tag (recommended: 30-60 characters)"),
        _ => {}
    }

    match s.meta.description_length() {
        0..=119 => out.push(
            Critical,
            "meta_description_short",
            "Add or improve the meta description (recommended: 120-160 characters)",
        ),
        161.. => out.push(
            Critical,
            "meta_description_long",
            "Shorten the meta description (recommended: 120-160 characters)",
        ),
        _ => {}
    }

    match s.headings.count(1) {
        0 => out.push(Critical, "h1_missing", "Add one H1 heading to the page"),
        1 => {}
        n => out.push(Critical, "h1_multiple", format!("Use a single H1 heading (found {n})")),
    }
}

/// Placement of the focus keyword, or of the top usage phrase without one.
fn keyword(s: &Signals, out: &mut Buckets) {
    let kw = &s.keywords;
    let placement = if let Some(f) = &kw.focus {
        Some((f.keyword.as_str(), f.in_title, f.density, f.in_meta_description, f.in_h1, f.in_first_100_words))
    } else {
        kw.top_usage().map(|u| {
            (u.phrase.as_str(), u.in_title, u.density, u.in_meta_description, u.in_h1, u.in_first_100_words)
        })
    };
    let Some((keyword, in_title, density, in_meta, in_h1, in_opening)) = placement else {
        return;
    };

    if !in_title {
        out.push(Priority::Critical, "keyword_title", format!("Add the main keyword \"{keyword}\" to the title tag"));
    }
    if density < DENSITY_MIN {
        out.push(
            Priority::Critical,
            "keyword_density_low",
            format!("Increase keyword density (currently {density}%, recommended 0.5-2.5%)"),
        );
    } else if density > DENSITY_MAX {
        out.push(
            Priority::Critical,
            "keyword_density_high",
            format!("Reduce keyword density (currently {density}%, recommended 0.5-2.5%)"),
        );
    }
    if !in_meta {
        out.push(
            Priority::Critical,
            "keyword_meta_description",
            format!("Add the main keyword \"{keyword}\" to the meta description"),
        );
    }
    if !in_h1 {
        out.push(Priority::Critical, "keyword_h1", format!("Add the main keyword \"{keyword}\" to the H1 heading"));
    }
    if !in_opening {
        out.push(
            Priority::Important,
            "keyword_first_paragraph",
            format!("Use the main keyword \"{keyword}\" in the first paragraph"),
        );
    }
}

fn content(s: &Signals, out: &mut Buckets) {
    let words = s.content_stats.word_count;
    if words < 300 {
        out.push(
            Priority::Critical,
            "content_thin",
            format!("Expand the content (currently {words} words, recommended at least 300)"),
        );
    } else if words > 2500 {
        out.push(
            Priority::Important,
            "content_long",
            format!("Consider splitting the content (currently {words} words, recommended under 2500)"),
        );
    }

    let internal = s.links.internal();
    if internal < 3 {
        out.push(
            Priority::Critical,
            "internal_links",
            format!("Add internal links (found {internal}, recommended at least 3)"),
        );
    }

    let without_alt = s.images.count(|i| i.alt.is_none());
    if without_alt > 0 {
        out.push(Priority::Important, "image_alt", format!("Add alt text to {without_alt} image(s)"));
    }

    match s.headings.count(2) {
        0 => out.push(Priority::Important, "h2_missing", "Add H2 headings to structure the content"),
        1 => out.push(Priority::Important, "h2_few", "Use at least 2-3 H2 headings"),
        _ => {}
    }

    let flesch = s.readability.flesch_score;
    if flesch < 60.0 {
        out.push(
            Priority::Important,
            "readability",
            format!("Improve readability (score {flesch:.1}/100, recommended above 60)"),
        );
    }

    if !s.structured_data.has_schema() {
        out.push(Priority::Important, "schema_missing", "Add Schema.org structured data for rich results");
    }
    if s.meta.canonical.is_none() {
        out.push(Priority::Important, "canonical_missing", "Add a canonical URL to avoid duplicate content");
    }

    let og = &s.meta.open_graph;
    if og.title.is_none() || og.description.is_none() {
        out.push(
            Priority::Optional,
            "open_graph",
            "Add Open Graph tags (og:title, og:description) for social sharing",
        );
    }
    if og.image.is_none() {
        out.push(Priority::Optional, "open_graph_image", "Add og:image so shared links show a picture");
    }
    let tw = &s.meta.twitter;
    if tw.card.is_none() && tw.title.is_none() && tw.description.is_none() {
        out.push(Priority::Optional, "twitter_cards", "Add Twitter Card tags for social sharing");
    }
    if s.links.external() == 0 {
        out.push(Priority::Optional, "external_links", "Consider linking to reputable external sources");
    }

    let well_named = s.images.count(ImageFacts::well_named) as f64;
    if well_named < s.images.total() as f64 * 0.8 {
        out.push(Priority::Optional, "image_names", "Use descriptive file names and alt text for images");
    }
}

fn technical(s: &Signals, out: &mut Buckets) {
    if !s.is_https {
        out.push(Priority::Critical, "https", "Serve the page over HTTPS");
    }
    if s.meta.viewport.is_none() {
        out.push(Priority::Critical, "viewport_missing", "Add a viewport meta tag for mobile devices");
    }
    if s.meta.charset.is_none() {
        out.push(Priority::Optional, "charset", "Declare the character set (UTF-8)");
    }
    if s.meta.language.is_none() {
        out.push(Priority::Important, "language", "Add a lang attribute to the <html> element");
    }
    if s.meta.favicon.is_none() {
        out.push(Priority::Optional, "favicon", "Add a favicon");
    }
}

fn structured_data(s: &Signals, out: &mut Buckets) {
    let sd = &s.structured_data;
    if !sd.has_schema() {
        return;
    }

    if !sd.errors.is_empty() {
        out.push(
            Priority::Critical,
            "schema_errors",
            format!("Fix structured data errors: {}", sd.errors.join(", ")),
        );
    }
    if !sd.conflicts.is_empty() {
        let conflicts: Vec<String> = sd
            .conflicts
            .iter()
            .map(|c| format!("{} declared {} times", c.schema_type, c.count))
            .collect();
        out.push(
            Priority::Important,
            "schema_conflicts",
            format!("Resolve duplicate structured data: {}", conflicts.join(", ")),
        );
    }
    if !sd.warnings.is_empty() {
        let first: Vec<&str> = sd.warnings.iter().take(2).map(String::as_str).collect();
        out.push(
            Priority::Important,
            "schema_warnings",
            format!("Complete structured data: {}", first.join(", ")),
        );
    }
}

fn mobile(s: &Signals, out: &mut Buckets) {
    let m = &s.mobile;
    if m.viewport_present && !m.viewport_valid() {
        out.push(
            Priority::Critical,
            "viewport_invalid",
            format!("Fix the viewport meta tag: {}", m.viewport_issues.join(", ")),
        );
    }
    if !m.touch_targets_valid() {
        out.push(
            Priority::Important,
            "touch_targets",
            format!("Enlarge touch targets to at least 48x48px ({} too small)", m.small_touch_targets),
        );
    }
    if !m.fonts_valid() {
        out.push(
            Priority::Important,
            "font_size",
            format!("Use font sizes of at least 12px ({} elements too small)", m.small_fonts),
        );
    }
    if let Some(width) = m.narrow_body_width {
        out.push(
            Priority::Important,
            "content_width",
            format!("Avoid a fixed body width of {width}px; use at least 320px or a fluid layout"),
        );
    }
}

fn images(s: &Signals, out: &mut Buckets) {
    let inv = &s.images;
    if inv.total() == 0 {
        return;
    }

    if inv.percent(|i| i.lazy) < 50.0 {
        out.push(Priority::Optional, "image_lazy", "Lazy-load images to speed up page load");
    }
    if inv.percent(|i| i.modern_format) < 30.0 {
        out.push(Priority::Optional, "image_format", "Consider modern image formats (WebP/AVIF)");
    }
    let oversized = inv.count(|i| i.oversized);
    if oversized > 0 {
        out.push(
            Priority::Important,
            "image_oversized",
            format!("Resize {oversized} image(s) larger than 2000px"),
        );
    }
}

fn anchors(s: &Signals, out: &mut Buckets) {
    if !s.links.over_optimized.is_empty() {
        out.push(
            Priority::Important,
            "anchor_over_optimized",
            "Reduce exact-match keyword anchor text on internal links",
        );
    }
    let generic = s.links.anchors(AnchorMatch::Generic) as f64;
    if generic > s.links.internal() as f64 * 0.3 {
        out.push(
            Priority::Optional,
            "anchor_generic",
            "Replace generic anchor text (\"click here\", \"read more\") with descriptive text",
        );
    }
}

fn trust(s: &Signals, out: &mut Buckets) {
    let t = &s.trust;
    if !t.author_schema && !t.has_author_bio() {
        out.push(
            Priority::Important,
            "eeat_author",
            "Add author information (Person schema or an author bio) for E-E-A-T",
        );
    }
    if !t.published_date {
        out.push(Priority::Important, "eeat_date", "Add a publication date");
    }
    if t.citation_links < 2 {
        out.push(Priority::Optional, "eeat_citations", "Cite reputable sources to build trust");
    }

    match (t.breadcrumb_schema, t.breadcrumb_nav) {
        (false, false) => out.push(
            Priority::Optional,
            "breadcrumbs_missing",
            "Add breadcrumbs with BreadcrumbList schema",
        ),
        (false, true) => out.push(
            Priority::Important,
            "breadcrumbs_schema",
            "Add BreadcrumbList schema to the existing breadcrumbs",
        ),
        _ => {}
    }
}

fn international(s: &Signals, out: &mut Buckets) {
    let hreflang = &s.meta.hreflang;
    if !hreflang.is_empty() && !hreflang.iter().any(|e| e.lang.eq_ignore_ascii_case("x-default")) {
        out.push(Priority::Important, "hreflang_default", "Add an hreflang x-default alternate");
    }

    let p = &s.meta.pagination;
    if p.next.is_some() && p.prev.is_none() {
        out.push(Priority::Optional, "pagination_prev", "Add rel=\"prev\" to complete pagination");
    }
}

/// Only probes that ran and came back negative produce a recommendation.
fn site(s: &Signals, out: &mut Buckets) {
    if s.site.www_issue() {
        out.push(
            Priority::Critical,
            "www_duplicate",
            "Both www and non-www hosts respond; redirect one to the other",
        );
    }
    if s.site.robots_txt == Some(false) {
        out.push(Priority::Important, "robots_txt", "Add a robots.txt file");
    }
    if s.site.sitemap == Some(false) {
        out.push(Priority::Important, "sitemap", "Add an XML sitemap");
    }
}

fn speed(performance: &PerformanceState, out: &mut Buckets) {
    let Some(m) = performance.metrics() else {
        return;
    };

    if let Some(lcp) = m.lcp.filter(|v| *v > LCP_GOOD_SECS) {
        out.push(
            Priority::Important,
            "lcp",
            format!("Improve Largest Contentful Paint ({lcp:.1}s, target 2.5s or less)"),
        );
    }
    if let Some(cls) = m.cls.filter(|v| *v > CLS_GOOD) {
        out.push(
            Priority::Important,
            "cls",
            format!("Reduce Cumulative Layout Shift ({cls:.2}, target 0.1 or less)"),
        );
    }
    if let Some(inp) = m.inp.filter(|v| *v > INP_GOOD_MS) {
        out.push(
            Priority::Important,
            "inp",
            format!("Improve Interaction to Next Paint ({inp:.0}ms, target 200ms or less)"),
        );
    }
}

fn markup(s: &Signals, out: &mut Buckets) {
    if s.markup.is_clean() {
        return;
    }
    let tags: Vec<String> = s.markup.tags.keys().map(|t| format!("<{t}>")).collect();
    out.push(
        Priority::Optional,
        "deprecated_tags",
        format!("Replace obsolete HTML tags: {}", tags.join(", ")),
    );
}
