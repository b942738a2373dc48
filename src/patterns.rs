//! Compiled regex patterns and fixed word lists.
//!
//! All patterns are compiled once at first use with `LazyLock`. They are
//! grouped by the stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Resource Neutralization
// =============================================================================

/// 1x1 transparent GIF substituted for every image source.
pub const PLACEHOLDER_IMAGE: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// `<img ... src="...">`, capturing the attributes around `src`.
pub static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img([^>]*?)\s+src\s*=\s*["']([^"']*)["']([^>]*)>"#).expect("IMG_SRC regex")
});

/// `<link ... href="...">`, capturing the attributes around `href`.
pub static LINK_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link([^>]*?)\s+href\s*=\s*["']([^"']*)["']([^>]*)>"#)
        .expect("LINK_HREF regex")
});

/// `rel` value inside a captured attribute run.
pub static REL_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\brel\s*=\s*["']([^"']*)["']"#).expect("REL_ATTR regex")
});

/// `<script ... src="...">`, capturing the attributes around `src`.
pub static SCRIPT_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script([^>]*?)\s+src\s*=\s*["']([^"']*)["']([^>]*)>"#)
        .expect("SCRIPT_SRC regex")
});

/// CSS `@import "..."` / `@import url(...)` statements.
pub static CSS_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)@import\s+(?:url\(\s*)?["']?([^"')\s;]+)["']?\s*\)?"#)
        .expect("CSS_IMPORT regex")
});

/// `<style>` blocks, capturing the open tag, the CSS body and the close tag.
pub static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<style\b[^>]*>)(.*?)(</style>)").expect("STYLE_BLOCK regex")
});

/// A quoted `style` attribute inside a start tag, capturing the tag prefix
/// and the quoted value.
pub static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<[a-z][^>]*?\sstyle\s*=\s*)("[^"]*"|'[^']*')"#).expect("STYLE_ATTR regex")
});

/// Inline `background-image: url(...)` declarations.
pub static BACKGROUND_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)background-image\s*:\s*url\(\s*["']?([^"')]+?)["']?\s*\)"#)
        .expect("BACKGROUND_IMAGE regex")
});

// =============================================================================
// Regex Text Fallback
// =============================================================================

/// Script, style and noscript blocks including their bodies.
pub static SCRIPT_STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>|<noscript\b.*?</noscript>")
        .expect("SCRIPT_STYLE_BLOCK regex")
});

/// Any remaining tag.
pub static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("ANY_TAG regex"));

/// Named or numeric character references.
pub static HTML_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:[a-zA-Z]+|#\d+|#x[0-9a-fA-F]+);").expect("HTML_ENTITY regex"));

/// Whitespace runs.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

// =============================================================================
// Text Analysis
// =============================================================================

/// Sentence terminators, Latin and CJK full-width.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?。！？]+").expect("SENTENCE_END regex"));

/// Fragments made only of digits, whitespace and light punctuation.
pub static NUMERIC_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s.,;:]+$").expect("NUMERIC_FRAGMENT regex"));

/// Anything that is not a Unicode letter or number.
pub static NON_WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]").expect("NON_WORD_CHAR regex"));

/// Lowercase Vietnamese letters carrying diacritics (plus `đ`).
pub const VIETNAMESE_LETTERS: &str = "àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđ";

/// Characters that are neither ASCII word characters nor Vietnamese letters.
pub static NON_SYLLABLE_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[^a-z0-9_{VIETNAMESE_LETTERS}]")).expect("NON_SYLLABLE_CHAR regex")
});

/// Vowel groups of a Vietnamese word.
pub static VIETNAMESE_VOWEL_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[{VIETNAMESE_LETTERS}aeiouy]+")).expect("VIETNAMESE_VOWEL_GROUP regex")
});

/// Silent English endings removed before counting vowel groups.
pub static ENGLISH_SILENT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("ENGLISH_SILENT_SUFFIX regex")
});

/// English vowel clusters of one or two letters.
pub static ENGLISH_VOWEL_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]{1,2}").expect("ENGLISH_VOWEL_GROUP regex"));

/// Anchor text that starts with a phrase carrying no topical signal.
pub static GENERIC_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(click here|read more|here|link|this|page|xem thêm|tại đây|nhấn vào đây)\b")
        .expect("GENERIC_ANCHOR regex")
});

/// Image file names that do not describe the image.
pub static UNDESCRIPTIVE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(image|img|photo|pic|untitled)")
        .expect("UNDESCRIPTIVE_FILENAME regex")
});

// =============================================================================
// Word Lists
// =============================================================================

/// English and Vietnamese stop words excluded from keyword frequency.
pub const STOP_WORDS: &[&str] = &[
    // English
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "should", "could", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "what", "which", "who",
    "whom", "whose", "where", "when", "why", "how", "all", "each", "every", "both", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "just", "don", "now",
    // Vietnamese
    "và", "của", "cho", "với", "trong", "từ", "đến", "có", "là", "được", "một", "những",
    "các", "về", "này", "đó", "sẽ", "đã", "cũng", "như", "khi", "nếu", "thì", "mà", "để",
    "vì", "nên", "hoặc", "nhưng",
];

/// Check a lowercased token against the stop-word list.
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Obsolete presentational and legacy tags.
pub const DEPRECATED_TAGS: &[&str] = &[
    "center", "font", "marquee", "blink", "applet", "basefont", "big", "dir", "frame",
    "frameset", "isindex", "noframes", "strike", "tt", "u", "acronym", "bgsound", "keygen",
    "listing", "nextid", "spacer", "xmp",
];
