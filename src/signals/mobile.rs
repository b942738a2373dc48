//! Mobile usability heuristics.
//!
//! All checks read declared values only (attributes and inline styles);
//! there is no layout engine, so stylesheet rules are invisible here.

use serde::Serialize;

use crate::dom::{self, Document, Selection};

/// Minimum touch-target edge in CSS pixels.
const MIN_TOUCH_TARGET_PX: f64 = 48.0;
/// Minimum legible font size in CSS pixels.
const MIN_FONT_PX: f64 = 12.0;
/// Narrowest acceptable fixed body width in CSS pixels.
const MIN_BODY_WIDTH_PX: f64 = 320.0;

const INTERACTIVE: &str =
    r#"a, button, input[type="button"], input[type="submit"], [role="button"]"#;
const TEXT_BEARING: &str = "p, span, div, li, td, th, a, h1, h2, h3, h4, h5, h6";

/// Result of the four mobile checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MobileUsabilityReport {
    /// A viewport meta tag exists.
    pub viewport_present: bool,
    /// Viewport problems; empty means valid.
    pub viewport_issues: Vec<String>,
    /// Interactive elements with a declared dimension under 48px.
    pub small_touch_targets: usize,
    /// Text elements with a declared font size under 12px.
    pub small_fonts: usize,
    /// Declared fixed body width, when under 320px.
    pub narrow_body_width: Option<f64>,
}

impl MobileUsabilityReport {
    /// `width=device-width`, `initial-scale`, and zoom allowed.
    #[must_use]
    pub fn viewport_valid(&self) -> bool {
        self.viewport_present && self.viewport_issues.is_empty()
    }

    #[must_use]
    pub fn touch_targets_valid(&self) -> bool {
        self.small_touch_targets == 0
    }

    #[must_use]
    pub fn fonts_valid(&self) -> bool {
        self.small_fonts == 0
    }

    #[must_use]
    pub fn width_valid(&self) -> bool {
        self.narrow_body_width.is_none()
    }

    /// Number of passing checks, 0 to 4.
    #[must_use]
    pub fn passed_checks(&self) -> u8 {
        [
            self.viewport_valid(),
            self.touch_targets_valid(),
            self.fonts_valid(),
            self.width_valid(),
        ]
        .into_iter()
        .map(u8::from)
        .sum()
    }
}

#[must_use]
pub fn collect(page: &Document, viewport: Option<&str>) -> MobileUsabilityReport {
    let viewport_issues = match viewport {
        Some(content) => viewport_issues(content),
        None => vec!["Missing viewport meta tag".to_string()],
    };

    MobileUsabilityReport {
        viewport_present: viewport.is_some(),
        viewport_issues,
        small_touch_targets: page
            .select(INTERACTIVE)
            .iter()
            .filter(is_small_touch_target)
            .count(),
        small_fonts: page
            .select(TEXT_BEARING)
            .iter()
            .filter(|el| {
                dom::inline_style_px(el, "font-size").is_some_and(|px| px > 0.0 && px < MIN_FONT_PX)
            })
            .count(),
        narrow_body_width: body_width(&page.select("body")),
    }
}

fn viewport_issues(content: &str) -> Vec<String> {
    let normalized: String = content
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut issues = Vec::new();
    if !normalized.contains("width=device-width") {
        issues.push("Viewport does not set width=device-width".to_string());
    }
    if !normalized.contains("initial-scale=") {
        issues.push("Viewport does not set initial-scale".to_string());
    }
    if normalized.contains("user-scalable=no") || normalized.contains("user-scalable=0") {
        issues.push("Viewport disables zooming (user-scalable=no)".to_string());
    }
    issues
}

fn is_small_touch_target(el: &Selection) -> bool {
    [dom::declared_px(el, "width"), dom::declared_px(el, "height")]
        .into_iter()
        .any(|px| px > 0.0 && px < MIN_TOUCH_TARGET_PX)
}

fn body_width(body: &Selection) -> Option<f64> {
    let declared = dom::declared_px(body, "width");
    (declared > 0.0 && declared < MIN_BODY_WIDTH_PX).then_some(declared)
}
