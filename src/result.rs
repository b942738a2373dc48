//! Analysis result type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::ContentSource;
use crate::recommendations::{self, Recommendation};
use crate::scoring::{
    performance, Category, PerformanceMetrics, PerformanceState, ScoreBreakdown, ScoreTier,
    PERFORMANCE_MAX, TOTAL_MAX,
};
use crate::signals::Signals;

/// Result of analyzing one page.
///
/// Produced by [`crate::analyze`] with the performance category `Pending`.
/// The performance stage later updates it in place through
/// [`AnalysisResult::merge_performance_metrics`] or
/// [`AnalysisResult::mark_performance_unavailable`]; every other field is
/// fixed once the primary analysis returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// The page URL as supplied.
    pub url: String,

    /// When the primary analysis ran.
    pub analyzed_at: DateTime<Utc>,

    /// Focus keyword supplied by the caller, trimmed.
    pub focus_keyword: Option<String>,

    /// Detection stage that produced the main content.
    pub content_source: ContentSource,

    /// Encoding the page was decoded from, when it arrived as bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<&'static str>,

    pub signals: Signals,

    pub breakdown: ScoreBreakdown,

    pub performance: PerformanceState,

    pub recommendations: Vec<Recommendation>,

    /// Non-fatal problems: failed collectors, decoding errors.
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    /// Weighted points earned, out of 100.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.breakdown.total()
    }

    /// The maximum shown next to the score: 92 until performance has been
    /// measured, 100 after.
    #[must_use]
    pub fn display_max(&self) -> f64 {
        if self.performance.is_measured() {
            TOTAL_MAX
        } else {
            TOTAL_MAX - PERFORMANCE_MAX
        }
    }

    /// Score as a whole percentage of [`Self::display_max`].
    #[must_use]
    pub fn percentage(&self) -> f64 {
        (self.score() / self.display_max() * 100.0).round()
    }

    #[must_use]
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_percentage(self.percentage())
    }

    /// Merge performance metrics into the score.
    ///
    /// Only the performance category and the recommendations change, so
    /// merging the same metrics again yields the same result. Metrics with
    /// no values mark the category unavailable instead.
    pub fn merge_performance_metrics(&mut self, metrics: PerformanceMetrics) {
        if metrics.is_empty() {
            self.mark_performance_unavailable("no metrics returned");
            return;
        }
        self.performance = PerformanceState::Measured { metrics };
        self.refresh_performance();
    }

    /// Record that the performance stage failed.
    ///
    /// Metrics already merged are kept.
    pub fn mark_performance_unavailable(&mut self, reason: impl Into<String>) {
        if self.performance.is_measured() {
            return;
        }
        let reason = reason.into();
        log::warn!("performance metrics unavailable for {}: {reason}", self.url);
        self.performance = PerformanceState::Unavailable { reason };
        self.refresh_performance();
    }

    fn refresh_performance(&mut self) {
        self.breakdown.set(
            Category::Performance,
            performance::category_score(&self.performance),
        );
        self.recommendations = recommendations::generate(&self.signals, &self.performance);
    }
}
