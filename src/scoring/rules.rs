//! The category table.
//!
//! Bands are literal cut points. Each grading function returns the raw
//! points and status; [`super::score`] caps points at the rule maximum.

use super::{Category, Status};
use crate::signals::{Collector, Signals};

/// One scored category.
pub struct Rule {
    pub category: Category,
    pub max: f64,
    /// Tracked with a zero maximum.
    pub nice_to_have: bool,
    /// Collector whose failure voids this category.
    pub source: Option<Collector>,
    pub grade: fn(&Signals) -> (f64, Status),
}

const fn weighted(
    category: Category,
    max: f64,
    source: Option<Collector>,
    grade: fn(&Signals) -> (f64, Status),
) -> Rule {
    Rule {
        category,
        max,
        nice_to_have: false,
        source,
        grade,
    }
}

const fn nice_to_have(
    category: Category,
    source: Option<Collector>,
    grade: fn(&Signals) -> (f64, Status),
) -> Rule {
    Rule {
        category,
        max: 0.0,
        nice_to_have: true,
        source,
        grade,
    }
}

/// Every category except performance, which depends on the merge state.
pub const RULES: &[Rule] = &[
    weighted(Category::Title, 9.0, Some(Collector::Meta), title),
    weighted(Category::MetaDescription, 6.0, Some(Collector::Meta), meta_description),
    weighted(Category::H1, 5.0, Some(Collector::Headings), h1),
    weighted(Category::ContentLength, 4.0, None, content_length),
    weighted(Category::Images, 4.0, Some(Collector::Images), images),
    weighted(Category::ImageFileSize, 3.0, Some(Collector::Images), image_file_size),
    weighted(Category::Keyword, 11.0, Some(Collector::Keywords), keyword),
    weighted(Category::Headings, 4.0, Some(Collector::Headings), headings),
    weighted(Category::InternalLinks, 4.0, Some(Collector::Links), internal_links),
    weighted(Category::ExternalLinks, 3.0, Some(Collector::Links), external_links),
    weighted(Category::OpenGraph, 3.0, Some(Collector::Meta), open_graph),
    nice_to_have(Category::TwitterCards, Some(Collector::Meta), twitter_cards),
    weighted(Category::Schema, 4.0, Some(Collector::StructuredData), schema),
    weighted(Category::MobileUsability, 4.0, Some(Collector::Mobile), mobile_usability),
    weighted(Category::Canonical, 2.0, Some(Collector::Meta), canonical),
    weighted(Category::Readability, 3.0, Some(Collector::Readability), readability),
    weighted(Category::Ssl, 4.0, None, ssl),
    weighted(Category::RobotsTxt, 2.0, None, robots_txt),
    weighted(Category::Sitemap, 2.0, None, sitemap),
    weighted(Category::Viewport, 2.0, Some(Collector::Meta), viewport),
    nice_to_have(Category::Charset, Some(Collector::Meta), charset),
    weighted(Category::Language, 1.0, Some(Collector::Meta), language),
    nice_to_have(Category::Favicon, Some(Collector::Meta), favicon),
    weighted(Category::WwwIssue, 2.0, None, www_issue),
    weighted(Category::Eeat, 6.0, Some(Collector::Trust), eeat),
    weighted(Category::Breadcrumbs, 2.0, Some(Collector::Trust), breadcrumbs),
    weighted(Category::Hreflang, 2.0, Some(Collector::Meta), hreflang),
    nice_to_have(Category::Pagination, Some(Collector::Meta), pagination),
];

fn present(found: bool, points: f64, missing: Status) -> (f64, Status) {
    if found {
        (points, Status::Good)
    } else {
        (0.0, missing)
    }
}

fn tracked(found: bool) -> (f64, Status) {
    (0.0, if found { Status::Good } else { Status::Warning })
}

fn title(s: &Signals) -> (f64, Status) {
    match s.meta.title_length() {
        30..=60 => (9.0, Status::Good),
        1..=29 => (4.0, Status::Warning),
        _ => (0.0, Status::Error),
    }
}

fn meta_description(s: &Signals) -> (f64, Status) {
    match s.meta.description_length() {
        120..=160 => (6.0, Status::Good),
        0 => (0.0, Status::Error),
        _ => (3.0, Status::Warning),
    }
}

fn h1(s: &Signals) -> (f64, Status) {
    match s.headings.count(1) {
        1 => (5.0, Status::Good),
        0 => (0.0, Status::Error),
        _ => (2.0, Status::Warning),
    }
}

fn content_length(s: &Signals) -> (f64, Status) {
    match s.content_stats.word_count {
        300..=2500 => (4.0, Status::Good),
        n if n >= 200 => (2.0, Status::Warning),
        _ => (0.0, Status::Error),
    }
}

fn images(s: &Signals) -> (f64, Status) {
    let inv = &s.images;
    if inv.total() == 0 {
        return (0.0, Status::Warning);
    }

    let alt = inv.percent(|i| i.alt.is_some());
    let mut points = if alt >= 90.0 {
        3.0
    } else if alt >= 50.0 {
        1.0
    } else {
        0.0
    };
    if inv.percent(|i| i.lazy) >= 50.0 {
        points += 1.0;
    }
    if inv.percent(|i| i.modern_format) >= 30.0 {
        points += 1.0;
    }
    (points, Status::banded(points, 3.0, 2.0))
}

fn image_file_size(s: &Signals) -> (f64, Status) {
    if s.images.total() == 0 {
        return (0.0, Status::Error);
    }

    let optimized = s.images.percent(|i| i.size_optimized);
    let points = if optimized >= 70.0 {
        3.0
    } else if optimized >= 50.0 {
        2.0
    } else if optimized >= 30.0 {
        1.0
    } else {
        0.0
    };
    (points, Status::banded(points, 2.0, 1.0))
}

/// Focus keyword placement when one was given, otherwise the top usage
/// phrase with a density bonus.
fn keyword(s: &Signals) -> (f64, Status) {
    let points: f64 = if let Some(focus) = &s.keywords.focus {
        [
            (focus.in_title, 3.0),
            (focus.in_title_start, 2.0),
            (focus.in_meta_description, 2.0),
            (focus.in_h1, 2.0),
            (focus.in_first_100_words, 2.0),
        ]
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, p)| p)
        .sum()
    } else if let Some(top) = s.keywords.top_usage() {
        let placement: f64 = [
            (top.in_title, 3.0),
            (top.in_title_start, 1.0),
            (top.in_meta_description, 2.0),
            (top.in_h1, 2.0),
            (top.in_first_100_words, 2.0),
        ]
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, p)| p)
        .sum();
        let density = if (0.5..=2.5).contains(&top.density) { 1.0 } else { 0.0 };
        placement + density
    } else {
        0.0
    };
    (points, Status::banded(points, 9.0, 6.0))
}

fn headings(s: &Signals) -> (f64, Status) {
    let mut points = 0.0;
    if s.headings.count(1) == 1 {
        points += 2.0;
    }
    if s.headings.count(2) >= 2 {
        points += 2.0;
    }
    (points, Status::banded(points, 3.0, 2.0))
}

fn internal_links(s: &Signals) -> (f64, Status) {
    match s.links.internal() {
        0 => (0.0, Status::Error),
        1 | 2 => (2.0, Status::Warning),
        _ => (4.0, Status::Good),
    }
}

fn external_links(s: &Signals) -> (f64, Status) {
    match s.links.external() {
        0 => (0.0, Status::Warning),
        1..=10 => (3.0, Status::Good),
        _ => (1.0, Status::Warning),
    }
}

fn open_graph(s: &Signals) -> (f64, Status) {
    let og = &s.meta.open_graph;
    let points = [&og.title, &og.description, &og.image]
        .iter()
        .filter(|field| field.is_some())
        .count() as f64;
    (points, Status::banded(points, 2.0, 1.0))
}

fn twitter_cards(s: &Signals) -> (f64, Status) {
    let tw = &s.meta.twitter;
    let found = f64::from(u8::from(tw.card.is_some()))
        + f64::from(u8::from(tw.title.is_some() || tw.description.is_some()));
    (0.0, Status::banded(found, 2.0, 1.0))
}

fn schema(s: &Signals) -> (f64, Status) {
    let sd = &s.structured_data;
    if !sd.has_schema() {
        return (0.0, Status::Warning);
    }

    let points = if sd.valid_count() > 0 {
        f64::from(sd.validation_score()).min(4.0)
    } else {
        3.0
    };
    (points, Status::banded(points, 3.0, 2.0))
}

fn mobile_usability(s: &Signals) -> (f64, Status) {
    let points = f64::from(s.mobile.passed_checks());
    (points, Status::banded(points, 3.0, 2.0))
}

fn canonical(s: &Signals) -> (f64, Status) {
    present(s.meta.canonical.is_some(), 2.0, Status::Warning)
}

fn readability(s: &Signals) -> (f64, Status) {
    let flesch = s.readability.flesch_score;
    if flesch >= 60.0 {
        (3.0, Status::Good)
    } else if flesch >= 40.0 {
        (1.0, Status::Warning)
    } else {
        (0.0, Status::Error)
    }
}

fn ssl(s: &Signals) -> (f64, Status) {
    present(s.is_https, 4.0, Status::Error)
}

fn robots_txt(s: &Signals) -> (f64, Status) {
    present(s.site.has_robots_txt(), 2.0, Status::Warning)
}

fn sitemap(s: &Signals) -> (f64, Status) {
    present(s.site.has_sitemap(), 2.0, Status::Warning)
}

fn viewport(s: &Signals) -> (f64, Status) {
    present(s.meta.viewport.is_some(), 2.0, Status::Error)
}

fn charset(s: &Signals) -> (f64, Status) {
    tracked(s.meta.charset.is_some())
}

fn language(s: &Signals) -> (f64, Status) {
    present(s.meta.language.is_some(), 1.0, Status::Warning)
}

fn favicon(s: &Signals) -> (f64, Status) {
    tracked(s.meta.favicon.is_some())
}

fn www_issue(s: &Signals) -> (f64, Status) {
    if s.site.www_issue() {
        (0.0, Status::Error)
    } else {
        (2.0, Status::Good)
    }
}

fn eeat(s: &Signals) -> (f64, Status) {
    let points = s.trust.eeat_points();
    (points, Status::banded(points, 5.0, 3.0))
}

fn breadcrumbs(s: &Signals) -> (f64, Status) {
    let points = s.trust.breadcrumb_points();
    (points, Status::banded(points, 2.0, 1.0))
}

fn hreflang(s: &Signals) -> (f64, Status) {
    let entries = &s.meta.hreflang;
    let has_default = entries.iter().any(|e| e.lang.eq_ignore_ascii_case("x-default"));
    let points = match entries.len() {
        0 => 0.0,
        1 => 0.5,
        _ if has_default => 2.0,
        _ => 1.0,
    };
    (points, Status::banded(points, 1.5, 0.5))
}

fn pagination(s: &Signals) -> (f64, Status) {
    let p = &s.meta.pagination;
    tracked(p.next.is_some() || p.prev.is_some())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::scoring::PERFORMANCE_MAX;

    #[test]
    fn test_weighted_maxima_sum_to_one_hundred() {
        let table: f64 = RULES.iter().filter(|r| !r.nice_to_have).map(|r| r.max).sum();
        assert_eq!(table + PERFORMANCE_MAX, 100.0);
        assert_eq!(table, 92.0);
    }

    #[test]
    fn test_every_category_appears_once() {
        let mut seen = BTreeSet::new();
        for rule in RULES {
            assert!(seen.insert(rule.category), "{:?} listed twice", rule.category);
            assert_ne!(rule.category, Category::Performance);
        }
        assert_eq!(seen.len(), 28);
    }

    #[test]
    fn test_nice_to_have_rules_have_no_weight() {
        for rule in RULES.iter().filter(|r| r.nice_to_have) {
            assert_eq!(rule.max, 0.0);
        }
    }

    #[test]
    fn test_title_bands() {
        let mut s = Signals::default();
        for (len, expected) in [(45, 9.0), (30, 9.0), (60, 9.0), (15, 4.0), (0, 0.0), (70, 0.0)] {
            s.meta.title = "a".repeat(len);
            assert_eq!(title(&s).0, expected, "length {len}");
        }
    }

    #[test]
    fn test_hreflang_bands() {
        use crate::signals::meta::HreflangEntry;

        let entry = |lang: &str| HreflangEntry {
            lang: lang.to_string(),
            href: String::new(),
        };
        let mut s = Signals::default();
        assert_eq!(hreflang(&s), (0.0, Status::Error));

        s.meta.hreflang = vec![entry("vi")];
        assert_eq!(hreflang(&s), (0.5, Status::Warning));

        s.meta.hreflang.push(entry("en"));
        assert_eq!(hreflang(&s), (1.0, Status::Warning));

        s.meta.hreflang.push(entry("x-default"));
        assert_eq!(hreflang(&s), (2.0, Status::Good));
    }

    #[test]
    fn test_www_issue_only_when_both_hosts_answer() {
        use crate::signals::site::WwwProbe;

        let mut s = Signals::default();
        assert_eq!(www_issue(&s), (2.0, Status::Good));

        s.site.www = Some(WwwProbe {
            www_exists: true,
            non_www_exists: true,
        });
        assert_eq!(www_issue(&s), (0.0, Status::Error));
    }
}
