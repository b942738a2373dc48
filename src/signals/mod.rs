//! Signal collectors.
//!
//! Each submodule derives one category of fact from the parsed page, the
//! main-content document or the extracted text. Collectors are independent
//! except for two explicit inputs: keyword placement reads the title, meta
//! description and first H1, and anchor classification reads the target
//! keyword.
//!
//! Every collector runs isolated: when it returns an error or panics on
//! malformed markup, its output falls back to the default value, it is
//! recorded in [`Signals::failed`], and the run goes on.

pub mod headings;
pub mod images;
pub mod keywords;
pub mod links;
pub mod markup;
pub mod meta;
pub mod mobile;
pub mod readability;
pub mod site;
pub mod structured_data;
pub mod trust;

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use url::Url;

use crate::content::ExtractedContent;
use crate::dom::Document;
use crate::error::{Error, Result};
use crate::Options;

pub use headings::HeadingOutline;
pub use images::ImageInventory;
pub use keywords::KeywordProfile;
pub use links::LinkGraph;
pub use markup::DeprecatedMarkup;
pub use meta::MetaFacts;
pub use mobile::MobileUsabilityReport;
pub use readability::ReadabilityReport;
pub use site::SiteProbes;
pub use structured_data::StructuredDataReport;
pub use trust::TrustSignals;

/// Collector identity, used to mark failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collector {
    Meta,
    Headings,
    Images,
    Links,
    StructuredData,
    Mobile,
    Readability,
    Keywords,
    Trust,
    Markup,
}

impl Collector {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Headings => "headings",
            Self::Images => "images",
            Self::Links => "links",
            Self::StructuredData => "structured_data",
            Self::Mobile => "mobile",
            Self::Readability => "readability",
            Self::Keywords => "keywords",
            Self::Trust => "trust",
            Self::Markup => "markup",
        }
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Size statistics of the main-content text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentStats {
    pub word_count: usize,
    pub characters: usize,
    pub characters_without_spaces: usize,
    /// Characters without whitespace per word, one decimal.
    pub avg_word_length: f64,
}

impl ContentStats {
    #[must_use]
    pub fn from_content(content: &ExtractedContent) -> Self {
        let text = content.plain_text.trim();
        let characters_without_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
        let word_count = content.word_count();
        let avg_word_length = if word_count == 0 {
            0.0
        } else {
            (characters_without_spaces as f64 / word_count as f64 * 10.0).round() / 10.0
        };

        Self {
            word_count,
            characters: text.chars().count(),
            characters_without_spaces,
            avg_word_length,
        }
    }
}

/// Everything the collectors found on one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signals {
    pub meta: MetaFacts,
    pub headings: HeadingOutline,
    pub images: ImageInventory,
    pub links: LinkGraph,
    pub structured_data: StructuredDataReport,
    pub mobile: MobileUsabilityReport,
    pub readability: ReadabilityReport,
    pub keywords: KeywordProfile,
    pub trust: TrustSignals,
    pub markup: DeprecatedMarkup,
    pub content_stats: ContentStats,
    pub site: SiteProbes,
    /// Page URL uses `https`.
    pub is_https: bool,
    /// Collectors that failed and fell back to defaults.
    pub failed: BTreeSet<Collector>,
}

impl Signals {
    /// Whether `collector` produced its output.
    #[must_use]
    pub fn succeeded(&self, collector: Collector) -> bool {
        !self.failed.contains(&collector)
    }
}

/// Inputs shared by every collector of one run.
#[derive(Clone, Copy)]
pub struct CollectorInput<'a> {
    /// The whole neutralized page.
    pub page: &'a Document,
    /// The main-content region, parsed on its own.
    pub content: &'a Document,
    pub extracted: &'a ExtractedContent,
    pub url: &'a Url,
    pub focus_keyword: Option<&'a str>,
    pub site: SiteProbes,
    pub options: &'a Options,
}

/// Run every collector. Failures are returned as human-readable warnings
/// alongside the signals.
#[must_use]
pub fn collect(input: &CollectorInput<'_>) -> (Signals, Vec<String>) {
    let mut guard = Isolation::default();

    let meta = guard.run(Collector::Meta, || Ok(meta::collect(input.page)));
    let headings = guard.run(Collector::Headings, || Ok(headings::collect(input.content)));

    let placement = keywords::Placement {
        title: &meta.title,
        meta_description: &meta.meta_description,
        first_h1: headings.first_h1(),
        url: input.url.as_str(),
    };
    let keywords = guard.run(Collector::Keywords, || {
        Ok(keywords::collect(
            &input.extracted.plain_text,
            &input.extracted.words,
            &placement,
            input.focus_keyword,
            input.options.keyword_limit,
            input.options.keyword_usage_limit,
        ))
    });

    let links = guard.run(Collector::Links, || {
        links::collect(input.content, input.url, keywords.target_keyword())
    });
    let mobile = guard.run(Collector::Mobile, || {
        Ok(mobile::collect(input.page, meta.viewport.as_deref()))
    });
    let images = guard.run(Collector::Images, || Ok(images::collect(input.content)));
    let structured_data = guard.run(Collector::StructuredData, || {
        Ok(structured_data::collect(input.page))
    });
    let readability = guard.run(Collector::Readability, || {
        Ok(readability::analyze(&input.extracted.plain_text, &input.extracted.words))
    });
    let trust = guard.run(Collector::Trust, || {
        Ok(trust::collect(input.page, input.content, input.url))
    });
    let markup = guard.run(Collector::Markup, || Ok(markup::collect(input.page)));

    let signals = Signals {
        content_stats: ContentStats::from_content(input.extracted),
        site: input.site,
        is_https: input.url.scheme() == "https",
        meta,
        headings,
        images,
        links,
        structured_data,
        mobile,
        readability,
        keywords,
        trust,
        markup,
        failed: guard.failed,
    };
    (signals, guard.warnings)
}

/// Failures gathered while running the collectors of one page.
#[derive(Default)]
struct Isolation {
    failed: BTreeSet<Collector>,
    warnings: Vec<String>,
}

impl Isolation {
    /// Run `collector`, turning an error or a panic into its default output.
    fn run<T: Default>(&mut self, collector: Collector, f: impl FnOnce() -> Result<T>) -> T {
        let outcome = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
            Err(Error::Collector {
                collector: collector.name(),
                reason: panic_message(payload.as_ref()),
            })
        });

        outcome.unwrap_or_else(|e| {
            log::warn!("{collector} collector failed: {e}");
            self.failed.insert(collector);
            self.warnings.push(format!("{collector} analysis unavailable: {e}"));
            T::default()
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panicked".to_string())
}
