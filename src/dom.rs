//! DOM Operations Adapter
//!
//! Small helpers over `dom_query` used by every collector. Collectors only
//! read the parsed tree through these functions and the `Selection` API;
//! the one mutating step (boilerplate removal) works on a cloned document.

pub use dom_query::{Document, Selection};

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, trimmed, treating empty values as absent.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Check if attribute exists
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Check whether the class list contains `class` as a whole token.
#[must_use]
pub fn has_class(sel: &Selection, class: &str) -> bool {
    class_name(sel).is_some_and(|c| c.split_whitespace().any(|token| token == class))
}

/// Lowercased `rel` attribute, empty when absent.
#[must_use]
pub fn rel(sel: &Selection) -> String {
    get_attribute(sel, "rel").unwrap_or_default().to_lowercase()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> String {
    sel.text().to_string()
}

/// Trimmed text content.
#[inline]
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> String {
    sel.html().to_string()
}

// === Inline Style Dimensions ===

/// Read a pixel value for `property` from the inline `style` attribute.
///
/// Only the leading number of the declaration is read, so `12px`, `12` and
/// `12.5px !important` all parse; `auto` or percentage-free garbage yields
/// `None`. Properties are matched exactly, so `max-width` is not `width`.
#[must_use]
pub fn inline_style_px(sel: &Selection, property: &str) -> Option<f64> {
    let style = get_attribute(sel, "style")?;
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            parse_leading_number(value.trim())
        } else {
            None
        }
    })
}

/// Declared pixel dimension: the numeric attribute if it parses, otherwise
/// the inline style. Returns `0.0` when nothing is declared.
#[must_use]
pub fn declared_px(sel: &Selection, dimension: &str) -> f64 {
    get_attribute(sel, dimension)
        .and_then(|v| parse_leading_number(v.trim()))
        .or_else(|| inline_style_px(sel, dimension))
        .unwrap_or(0.0)
}

/// Parse the leading decimal number of `s` (`"640px"` -> 640.0).
#[must_use]
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

// === Document Operations ===

/// Clone document
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select() {
        let doc = parse(r#"<div id="main" class="container wide">content</div>"#);
        let div = doc.select("div");

        assert_eq!(get_attribute(&div, "id"), Some("main".to_string()));
        assert!(has_class(&div, "wide"));
        assert!(!has_class(&div, "contain"));
        assert_eq!(tag_name(&div), Some("div".to_string()));
    }

    #[test]
    fn test_clone_is_independent() {
        let doc = parse(r#"<div><nav>menu</nav><p>content</p></div>"#);
        let copy = clone_document(&doc);
        copy.select("nav").remove();

        assert!(copy.select("nav").is_empty());
        assert!(doc.select("nav").exists());
    }

    #[test]
    fn test_inline_style_px() {
        let doc = parse(r#"<a style="max-width: 10px; width: 30px; font-size:11.5px">x</a>"#);
        let a = doc.select("a");

        assert_eq!(inline_style_px(&a, "width"), Some(30.0));
        assert_eq!(inline_style_px(&a, "font-size"), Some(11.5));
        assert_eq!(inline_style_px(&a, "height"), None);
    }

    #[test]
    fn test_declared_px_prefers_attribute() {
        let doc = parse(r#"<img width="640" height="auto" style="height: 480px">"#);
        let img = doc.select("img");

        assert_eq!(declared_px(&img, "width"), 640.0);
        assert_eq!(declared_px(&img, "height"), 480.0);
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("2400px"), Some(2400.0));
        assert_eq!(parse_leading_number("12.5em"), Some(12.5));
        assert_eq!(parse_leading_number("auto"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn test_non_empty_attribute() {
        let doc = parse(r#"<img alt="  " title=" Logo ">"#);
        let img = doc.select("img");

        assert_eq!(non_empty_attribute(&img, "alt"), None);
        assert_eq!(non_empty_attribute(&img, "title"), Some("Logo".to_string()));
    }
}
