//! Character encoding detection and transcoding.
//!
//! Pages served as bytes are decoded using the charset declared in the
//! markup. Legacy Vietnamese pages are commonly `windows-1258`, which
//! `encoding_rs` supports directly.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Bytes of the document inspected for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// HTML decoded to UTF-8 together with the encoding that was applied.
#[derive(Debug, Clone)]
pub struct DecodedHtml {
    /// Document text.
    pub text: String,
    /// Canonical name of the encoding used (`"UTF-8"`, `"windows-1258"`, ...).
    pub encoding: &'static str,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Find the charset label declared in the first kilobyte of the document.
///
/// `<meta http-equiv="Content-Type">` is checked first because its
/// `content` attribute also contains `charset=`, which the plain
/// `<meta charset>` pattern would otherwise read with a trailing quote.
#[must_use]
pub fn declared_charset(html: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    CONTENT_TYPE_CHARSET_RE
        .captures(&head)
        .or_else(|| CHARSET_META_RE.captures(&head))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Detect character encoding from HTML bytes, defaulting to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    declared_charset(html)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to UTF-8.
///
/// Invalid sequences are replaced rather than rejected; `had_errors`
/// reports whether that happened so callers can surface a warning.
///
/// # Examples
///
/// ```
/// use rs_seo_audit::encoding::decode_html;
///
/// let decoded = decode_html(b"<html><body>Xin chao</body></html>");
/// assert_eq!(decoded.encoding, "UTF-8");
/// assert!(decoded.text.contains("Xin chao"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> DecodedHtml {
    let encoding = detect_encoding(html);
    let (text, used, had_errors) = encoding.decode(html);

    DecodedHtml {
        text: text.into_owned(),
        encoding: used.name(),
        had_errors,
    }
}
