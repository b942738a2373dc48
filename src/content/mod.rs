//! Content Extractor
//!
//! Turns a parsed page into an [`ExtractedContent`] view: the main-content
//! region as HTML, its plain text, and its whitespace-separated word list.
//!
//! Detection order:
//! 1. semantic containers (`main`, `article`, `[role="main"]`, common
//!    content class and id names) with more than
//!    [`Options::min_main_content_chars`] characters of text;
//! 2. the largest `div`/`section` left after stripping header, footer,
//!    navigation, sidebar and ad-like elements, if it exceeds
//!    [`Options::min_container_chars`];
//! 3. the body minus header, footer and navigation.
//!
//! If the chosen region yields fewer than [`Options::min_extracted_chars`]
//! characters, the text is recovered from the raw markup by a regex
//! tag-stripping pass instead.

mod neutralize;

pub use neutralize::neutralize_resources;

use serde::Serialize;

use crate::dom::{self, Document};
use crate::patterns::{ANY_TAG, HTML_ENTITY, SCRIPT_STYLE_BLOCK, WHITESPACE_RUN};
use crate::Options;

/// Elements that never carry readable content.
const NON_CONTENT: &str =
    "script, style, noscript, iframe, embed, object, applet, audio, video, canvas, svg";

/// Semantic containers, tried in order.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    r#"[role="main"]"#,
    ".main-content",
    ".content",
    "#main-content",
    "#content",
    ".post-content",
    ".entry-content",
    ".article-content",
    "main article",
    "article .content",
];

/// Page chrome removed before the largest-container search.
const BOILERPLATE: &str = r#"header, footer, nav, aside, .sidebar, .footer, .header, .navigation, .menu, .widget, .advertisement, .ads, [class*="ad-"], [id*="ad-"]"#;

/// Page chrome removed from the body fallback.
const BODY_BOILERPLATE: &str =
    "header, footer, nav, aside, .sidebar, .footer, .header, .navigation";

/// Layout classes that wrap the whole page rather than its content.
const LAYOUT_CLASSES: &[&str] = &["wrapper", "container"];

/// Where the main-content text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "selector", rename_all = "snake_case")]
pub enum ContentSource {
    /// A semantic container matched by the given selector.
    Semantic(String),
    /// The largest text container after boilerplate removal.
    LargestContainer,
    /// The body minus header, footer and navigation.
    Body,
    /// Regex tag stripping over the raw markup.
    RegexFallback,
}

/// Main-content view of one analyzed page.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedContent {
    /// Outer HTML of the chosen region.
    #[serde(skip)]
    pub main_content_html: String,
    /// Text of the chosen region.
    #[serde(skip)]
    pub plain_text: String,
    /// Whitespace-separated tokens of `plain_text`, empty tokens dropped.
    #[serde(skip)]
    pub words: Vec<String>,
    /// Detection stage that produced the region.
    pub source: ContentSource,
}

impl ExtractedContent {
    /// Number of tokens in the main content.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Extract the main-content region of `page`.
///
/// `page` is only read; removals happen on a private clone. `raw_html` is
/// the neutralized markup the page was parsed from and is used by the regex
/// fallback.
#[must_use]
pub fn extract(page: &Document, raw_html: &str, options: &Options) -> ExtractedContent {
    let cleaned = dom::clone_document(page);
    cleaned.select(NON_CONTENT).remove();

    let (main_content_html, mut plain_text, mut source) = semantic_region(&cleaned, options)
        .or_else(|| largest_container(&cleaned, options))
        .unwrap_or_else(|| body_region(&cleaned));

    if plain_text.trim().chars().count() < options.min_extracted_chars {
        log::debug!("main content too short, stripping tags from raw markup");
        plain_text = strip_tags(raw_html);
        source = ContentSource::RegexFallback;
    }

    let words = plain_text.split_whitespace().map(str::to_string).collect();

    ExtractedContent {
        main_content_html,
        plain_text,
        words,
        source,
    }
}

fn semantic_region(doc: &Document, options: &Options) -> Option<(String, String, ContentSource)> {
    CONTENT_SELECTORS.iter().find_map(|selector| {
        let candidate = doc.select(selector).first();
        if candidate.is_empty() {
            return None;
        }

        let text = dom::text_content(&candidate);
        if text.trim().chars().count() > options.min_main_content_chars {
            log::debug!("main content matched {selector}");
            Some((
                dom::outer_html(&candidate),
                text,
                ContentSource::Semantic((*selector).to_string()),
            ))
        } else {
            None
        }
    })
}

fn largest_container(doc: &Document, options: &Options) -> Option<(String, String, ContentSource)> {
    let stripped = dom::clone_document(doc);
    stripped.select(BOILERPLATE).remove();

    let mut best: Option<(usize, String, String)> = None;
    for container in stripped.select("div, section").iter() {
        if LAYOUT_CLASSES.iter().any(|class| dom::has_class(&container, class)) {
            continue;
        }

        let text = dom::text_content(&container);
        let length = text.trim().chars().count();
        if length > options.min_container_chars && best.as_ref().is_none_or(|(max, _, _)| length > *max) {
            best = Some((length, dom::outer_html(&container), text));
        }
    }

    best.map(|(length, html, text)| {
        log::debug!("main content is largest container ({length} chars)");
        (html, text, ContentSource::LargestContainer)
    })
}

fn body_region(doc: &Document) -> (String, String, ContentSource) {
    doc.select(BODY_BOILERPLATE).remove();
    let body = doc.select("body");
    (
        dom::outer_html(&body),
        dom::text_content(&body),
        ContentSource::Body,
    )
}

/// Plain text recovered from markup with regular expressions only.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let text = SCRIPT_STYLE_BLOCK.replace_all(html, " ");
    let text = ANY_TAG.replace_all(&text, " ");
    let text = HTML_ENTITY.replace_all(&text, " ");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}
