//! Report rendering.
//!
//! The engine never prints. Presentation goes through a [`ReportSink`],
//! which sees the primary result first and the result updated by the
//! performance stage second.

use std::fmt::Write as _;
use std::io::Write;

use crate::recommendations::Priority;
use crate::result::AnalysisResult;
use crate::scoring::{PerformanceState, ScoreTier, Status};

/// Receives results as the session produces them.
pub trait ReportSink {
    /// The primary analysis, performance still pending.
    fn primary(&mut self, result: &AnalysisResult);

    /// The same analysis after the performance stage, measured or not.
    fn updated(&mut self, result: &AnalysisResult);
}

/// Keeps every result it is handed, in order.
impl ReportSink for Vec<AnalysisResult> {
    fn primary(&mut self, result: &AnalysisResult) {
        self.push(result.clone());
    }

    fn updated(&mut self, result: &AnalysisResult) {
        self.push(result.clone());
    }
}

/// Writes plain-text reports to `W`.
///
/// The primary result is rendered in full. The update only repeats the
/// score line and the performance section.
pub struct TextReport<W> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            log::warn!("failed to write report: {e}");
        }
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn primary(&mut self, result: &AnalysisResult) {
        let text = render_text(result);
        self.emit(&text);
    }

    fn updated(&mut self, result: &AnalysisResult) {
        let mut text = String::from("\n");
        score_line(&mut text, result);
        performance_line(&mut text, &result.performance);
        self.emit(&text);
    }
}

/// Prints JSON documents, one per stage.
pub struct JsonReport<W> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, result: &AnalysisResult) {
        let written = render_json(result)
            .map_err(std::io::Error::from)
            .and_then(|json| writeln!(self.out, "{json}"));
        if let Err(e) = written {
            log::warn!("failed to write report: {e}");
        }
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn primary(&mut self, result: &AnalysisResult) {
        self.emit(result);
    }

    fn updated(&mut self, result: &AnalysisResult) {
        self.emit(result);
    }
}

/// Pretty-printed JSON of the whole result.
pub fn render_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Human-readable report: score line, breakdown, recommendations by bucket.
#[must_use]
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SEO audit: {}", result.url);
    let _ = writeln!(out, "Analyzed:  {}", result.analyzed_at.to_rfc3339());
    if let Some(keyword) = &result.focus_keyword {
        let _ = writeln!(out, "Focus keyword: {keyword}");
    }
    score_line(&mut out, result);

    out.push_str("\nBreakdown:\n");
    for (category, entry) in result.breakdown.iter() {
        if entry.nice_to_have {
            let _ = writeln!(
                out,
                "  {:<32} {:>9}  {}",
                category.label(),
                "-",
                status_label(entry.status)
            );
        } else {
            let _ = writeln!(
                out,
                "  {:<32} {:>9}  {}",
                category.label(),
                format!("{}/{}", entry.points, entry.max),
                status_label(entry.status)
            );
        }
    }
    performance_line(&mut out, &result.performance);

    if !result.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        let mut current: Option<Priority> = None;
        for rec in &result.recommendations {
            if current != Some(rec.priority) {
                let _ = writeln!(out, "{}:", rec.priority.label());
                current = Some(rec.priority);
            }
            let _ = writeln!(out, "  - {}", rec.text);
        }
    }

    if !result.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &result.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    out
}

fn score_line(out: &mut String, result: &AnalysisResult) {
    let _ = writeln!(
        out,
        "Score: {}/{} ({}%, {})",
        result.score(),
        result.display_max(),
        result.percentage(),
        tier_label(result.tier())
    );
    if !result.performance.is_measured() {
        out.push_str("Sample score, performance not measured yet\n");
    }
}

fn performance_line(out: &mut String, performance: &PerformanceState) {
    match performance {
        PerformanceState::Pending => out.push_str("Performance: pending\n"),
        PerformanceState::Unavailable { reason } => {
            let _ = writeln!(out, "Performance: unavailable ({reason})");
        }
        PerformanceState::Measured { metrics } => {
            let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| v.to_string());
            let _ = writeln!(
                out,
                "Performance: LCP {}s, CLS {}, INP {}ms",
                show(metrics.lcp),
                show(metrics.cls),
                show(metrics.inp.or(metrics.fid))
            );
        }
    }
}

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Good => "good",
        Status::Warning => "warning",
        Status::Error => "error",
    }
}

fn tier_label(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Excellent => "excellent",
        ScoreTier::Good => "good",
        ScoreTier::Fair => "fair",
        ScoreTier::Poor => "poor",
    }
}
