//! Core Web Vitals category.
//!
//! Metrics arrive after the primary result from a third-party source. Until
//! then the category is `Pending` and scores 0 of 8 with a warning. A fetch
//! that fails, or returns no values, leaves it `Unavailable`.

use serde::{Deserialize, Serialize};

use super::{CategoryScore, Status};

/// Points reserved for performance out of the 100 total.
pub const PERFORMANCE_MAX: f64 = 8.0;

/// LCP above this many seconds needs work.
pub const LCP_GOOD_SECS: f64 = 2.5;
/// CLS above this needs work.
pub const CLS_GOOD: f64 = 0.1;
/// INP above this many milliseconds needs work.
pub const INP_GOOD_MS: f64 = 200.0;

/// Lab or field metrics as supplied by the metrics source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Largest Contentful Paint, seconds.
    pub lcp: Option<f64>,
    /// Cumulative Layout Shift.
    pub cls: Option<f64>,
    /// Interaction to Next Paint, milliseconds.
    pub inp: Option<f64>,
    /// First Input Delay, milliseconds. Used when INP is missing.
    pub fid: Option<f64>,
    /// Total Blocking Time, milliseconds.
    pub tbt: Option<f64>,
    /// First Contentful Paint, seconds.
    pub fcp: Option<f64>,
    /// Speed Index, seconds.
    pub speed_index: Option<f64>,
    /// Time to Interactive, seconds.
    pub tti: Option<f64>,
}

impl PerformanceMetrics {
    /// No metric carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            self.lcp,
            self.cls,
            self.inp,
            self.fid,
            self.tbt,
            self.fcp,
            self.speed_index,
            self.tti,
        ]
        .iter()
        .all(Option::is_none)
    }

    /// Points out of 8: LCP 3, CLS 3, INP (or FID) 2.
    #[must_use]
    pub fn points(&self) -> f64 {
        let lcp = match self.lcp {
            Some(v) if v <= LCP_GOOD_SECS => 3.0,
            Some(v) if v <= 4.0 => 1.5,
            _ => 0.0,
        };
        let cls = match self.cls {
            Some(v) if v <= CLS_GOOD => 3.0,
            Some(v) if v <= 0.25 => 1.5,
            _ => 0.0,
        };
        let interaction = match (self.inp, self.fid) {
            (Some(inp), _) if inp <= INP_GOOD_MS => 2.0,
            (Some(inp), _) if inp <= 500.0 => 1.0,
            (Some(_), _) => 0.0,
            (None, Some(fid)) if fid <= 100.0 => 2.0,
            (None, Some(fid)) if fid <= 300.0 => 1.0,
            (None, _) => 0.0,
        };
        lcp + cls + interaction
    }
}

/// Where the performance stage stands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PerformanceState {
    /// Not fetched yet.
    #[default]
    Pending,
    /// The fetch failed or returned nothing.
    Unavailable { reason: String },
    /// Metrics merged into the score.
    Measured { metrics: PerformanceMetrics },
}

impl PerformanceState {
    #[must_use]
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured { .. })
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&PerformanceMetrics> {
        match self {
            Self::Measured { metrics } => Some(metrics),
            _ => None,
        }
    }
}

/// Breakdown entry for the current state.
#[must_use]
pub fn category_score(state: &PerformanceState) -> CategoryScore {
    let (points, status) = match state {
        PerformanceState::Measured { metrics } => {
            let points = metrics.points();
            (points, Status::banded(points, 6.0, 3.0))
        }
        PerformanceState::Pending | PerformanceState::Unavailable { .. } => (0.0, Status::Warning),
    };

    CategoryScore {
        points,
        max: PERFORMANCE_MAX,
        status,
        nice_to_have: false,
    }
}
