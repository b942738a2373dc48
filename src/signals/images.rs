//! Image inventory of the main content.
//!
//! Sources are read from `data-original-src` first because resource
//! neutralization has replaced `src` with a placeholder.
//!
//! The byte size of each image is *estimated* from its declared pixel area
//! and a per-format bytes-per-pixel constant. Nothing is downloaded, so the
//! estimate only flags likely-unoptimized images and is never reported as a
//! measured size.

use serde::Serialize;

use crate::dom::{self, Document, Selection};
use crate::patterns::UNDESCRIPTIVE_FILENAME;
use crate::url_utils::filename_from_src;

/// Declared width or height above which an image counts as oversized.
const OVERSIZE_PX: f64 = 2000.0;

/// Estimated bytes per pixel by format.
const BYTES_PER_PIXEL_MODERN: f64 = 0.75;
const BYTES_PER_PIXEL_PNG: f64 = 3.0;
const BYTES_PER_PIXEL_DEFAULT: f64 = 1.5;

/// One `<img>` in the main content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageFacts {
    /// Original source URL.
    pub src: String,
    /// File name of `src` without query or fragment.
    pub filename: String,
    /// Trimmed alt text; `None` when missing or blank.
    pub alt: Option<String>,
    /// Title attribute.
    pub title: Option<String>,
    /// Declared width in pixels, `0` when undeclared.
    pub width: f64,
    /// Declared height in pixels, `0` when undeclared.
    pub height: f64,
    /// Carries `srcset` or `sizes`.
    pub responsive: bool,
    /// `loading="lazy"` or a deferred `data-src`.
    pub lazy: bool,
    /// WebP or AVIF in `src` or `srcset`.
    pub modern_format: bool,
    /// Declared width or height above 2000px.
    pub oversized: bool,
    /// File name does not start with a camera or placeholder prefix.
    pub descriptive_filename: bool,
    /// Estimated size in KB from declared dimensions. Not a measurement.
    pub estimated_kb: f64,
    /// Estimated size is within the band for its dimensions.
    pub size_optimized: bool,
}

impl ImageFacts {
    /// Descriptive file name and alt text both present.
    #[must_use]
    pub fn well_named(&self) -> bool {
        self.descriptive_filename && self.alt.is_some()
    }
}

/// Every image of the main content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageInventory {
    /// Images in document order.
    pub images: Vec<ImageFacts>,
}

impl ImageInventory {
    /// Number of images.
    #[must_use]
    pub fn total(&self) -> usize {
        self.images.len()
    }

    /// Number of images matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&ImageFacts) -> bool) -> usize {
        self.images.iter().filter(|img| predicate(img)).count()
    }

    /// Share of images matching `predicate`, in percent. `0` without images.
    pub fn percent(&self, predicate: impl Fn(&ImageFacts) -> bool) -> f64 {
        if self.images.is_empty() {
            return 0.0;
        }
        self.count(predicate) as f64 / self.images.len() as f64 * 100.0
    }
}

#[must_use]
pub fn collect(content: &Document) -> ImageInventory {
    let images = content.select("img").iter().map(|img| inspect(&img)).collect();
    ImageInventory { images }
}

fn inspect(img: &Selection) -> ImageFacts {
    let src = dom::non_empty_attribute(img, "data-original-src")
        .or_else(|| dom::non_empty_attribute(img, "src"))
        .unwrap_or_default();
    let srcset = dom::get_attribute(img, "srcset").unwrap_or_default();
    let filename = filename_from_src(&src);

    let width = dom::declared_px(img, "width");
    let height = dom::declared_px(img, "height");

    let src_lower = src.to_lowercase();
    let srcset_lower = srcset.to_lowercase();
    let modern_format = [".webp", ".avif"]
        .iter()
        .any(|ext| src_lower.contains(ext) || srcset_lower.contains(ext));
    let oversized = width > OVERSIZE_PX || height > OVERSIZE_PX;

    let bytes_per_pixel = if modern_format {
        BYTES_PER_PIXEL_MODERN
    } else if src_lower.contains(".png") {
        BYTES_PER_PIXEL_PNG
    } else {
        BYTES_PER_PIXEL_DEFAULT
    };
    let estimated_kb = width * height * bytes_per_pixel / 1024.0;

    ImageFacts {
        alt: dom::non_empty_attribute(img, "alt"),
        title: dom::non_empty_attribute(img, "title"),
        responsive: !srcset.is_empty() || dom::has_attribute(img, "sizes"),
        lazy: dom::get_attribute(img, "loading").is_some_and(|l| l.eq_ignore_ascii_case("lazy"))
            || dom::has_attribute(img, "data-src"),
        descriptive_filename: !filename.is_empty() && !UNDESCRIPTIVE_FILENAME.is_match(&filename),
        size_optimized: size_optimized(width.max(height), estimated_kb, modern_format, oversized),
        src,
        filename,
        width,
        height,
        modern_format,
        oversized,
        estimated_kb: (estimated_kb * 10.0).round() / 10.0,
    }
}

/// Size band check: small images must stay under 200KB, medium under 500KB,
/// large under 1000KB. Modern formats under 500KB always pass, oversized
/// images never do.
fn size_optimized(max_dimension: f64, estimated_kb: f64, modern_format: bool, oversized: bool) -> bool {
    if oversized {
        return false;
    }

    let within_band = if max_dimension < 800.0 {
        estimated_kb < 200.0
    } else if max_dimension < 1500.0 {
        estimated_kb < 500.0
    } else {
        estimated_kb < 1000.0
    };

    within_band || (modern_format && estimated_kb < 500.0)
}
