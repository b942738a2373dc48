//! Scoring engine.
//!
//! Every scored category is one entry of the declarative [`rules::RULES`]
//! table: a category, its maximum, the collector it reads, and a grading
//! function over [`Signals`]. Scoring walks the table uniformly and adds
//! the performance category from the current [`PerformanceState`].
//!
//! The maxima of all weighted categories, performance included, sum to
//! exactly 100. Nice-to-have categories are tracked with a maximum of zero
//! and never contribute points.

pub mod performance;
pub mod rules;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::signals::Signals;

pub use performance::{PerformanceMetrics, PerformanceState, PERFORMANCE_MAX};

/// Total of all weighted maxima.
pub const TOTAL_MAX: f64 = 100.0;

/// Category health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Good,
    Warning,
    Error,
}

impl Status {
    /// `Good` at or above `good`, `Warning` at or above `warning`, else `Error`.
    #[must_use]
    pub fn banded(points: f64, good: f64, warning: f64) -> Self {
        if points >= good {
            Self::Good
        } else if points >= warning {
            Self::Warning
        } else {
            Self::Error
        }
    }
}

/// Score categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Title,
    MetaDescription,
    H1,
    ContentLength,
    Images,
    ImageFileSize,
    Keyword,
    Headings,
    InternalLinks,
    ExternalLinks,
    OpenGraph,
    TwitterCards,
    Schema,
    MobileUsability,
    Canonical,
    Readability,
    Ssl,
    RobotsTxt,
    Sitemap,
    Viewport,
    Charset,
    Language,
    Favicon,
    WwwIssue,
    Eeat,
    Breadcrumbs,
    Hreflang,
    Pagination,
    Performance,
}

impl Category {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title tag",
            Self::MetaDescription => "Meta description",
            Self::H1 => "H1 tag",
            Self::ContentLength => "Content length",
            Self::Images => "Image optimization",
            Self::ImageFileSize => "Image file size (estimated)",
            Self::Keyword => "Keyword optimization",
            Self::Headings => "Heading structure",
            Self::InternalLinks => "Internal links",
            Self::ExternalLinks => "External links",
            Self::OpenGraph => "Open Graph",
            Self::TwitterCards => "Twitter Cards",
            Self::Schema => "Schema markup",
            Self::MobileUsability => "Mobile usability",
            Self::Canonical => "Canonical URL",
            Self::Readability => "Readability",
            Self::Ssl => "SSL/HTTPS",
            Self::RobotsTxt => "robots.txt",
            Self::Sitemap => "Sitemap",
            Self::Viewport => "Viewport meta tag",
            Self::Charset => "Charset",
            Self::Language => "Language attribute",
            Self::Favicon => "Favicon",
            Self::WwwIssue => "WWW/non-WWW consistency",
            Self::Eeat => "E-E-A-T signals",
            Self::Breadcrumbs => "Breadcrumbs",
            Self::Hreflang => "Hreflang",
            Self::Pagination => "Pagination",
            Self::Performance => "Performance (Core Web Vitals)",
        }
    }
}

/// Points awarded in one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScore {
    pub points: f64,
    pub max: f64,
    pub status: Status,
    /// Tracked for recommendations but weighted zero.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nice_to_have: bool,
}

/// Per-category breakdown of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreBreakdown {
    categories: BTreeMap<Category, CategoryScore>,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.get(&category)
    }

    /// Points of `category`, `0` when absent.
    #[must_use]
    pub fn points(&self, category: Category) -> f64 {
        self.get(category).map_or(0.0, |c| c.points)
    }

    /// Insert or replace a category.
    pub fn set(&mut self, category: Category, score: CategoryScore) {
        self.categories.insert(category, score);
    }

    /// Categories in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryScore)> {
        self.categories.iter().map(|(c, s)| (*c, s))
    }

    fn weighted(&self) -> impl Iterator<Item = &CategoryScore> {
        self.categories.values().filter(|c| !c.nice_to_have)
    }

    /// Sum of weighted points, capped at 100.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weighted().map(|c| c.points).sum::<f64>().min(TOTAL_MAX)
    }

    /// Sum of weighted maxima. Always 100 for a scored page.
    #[must_use]
    pub fn max_total(&self) -> f64 {
        self.weighted().map(|c| c.max).sum()
    }
}

/// Overall rating bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    /// Tier for a score percentage (0 to 100).
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Excellent
        } else if percentage >= 60.0 {
            Self::Good
        } else if percentage >= 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Score every category for `signals`, with performance taken from `performance`.
#[must_use]
pub fn score(signals: &Signals, performance: &PerformanceState) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    for rule in rules::RULES {
        let graded = rule.source.is_none_or(|c| signals.succeeded(c));
        let (points, status) = if graded {
            (rule.grade)(signals)
        } else {
            (0.0, Status::Warning)
        };

        breakdown.set(
            rule.category,
            CategoryScore {
                points: points.min(rule.max),
                max: rule.max,
                status,
                nice_to_have: rule.nice_to_have,
            },
        );
    }

    breakdown.set(Category::Performance, performance::category_score(performance));
    breakdown
}
