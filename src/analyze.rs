//! Analysis pipeline.
//!
//! One run: validate the input, neutralize resource references, parse the
//! page once, extract the main content and parse it on its own, run the
//! collectors, score, recommend. Every stage after validation is a pure
//! function of the document.

use chrono::Utc;

use crate::content;
use crate::dom;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::recommendations;
use crate::result::AnalysisResult;
use crate::scoring::{self, PerformanceState};
use crate::signals::{self, CollectorInput, SiteProbes};
use crate::url_utils::parse_page_url;

/// Page input for one run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageInput<'a> {
    pub html: &'a str,
    pub url: &'a str,
    pub focus_keyword: Option<&'a str>,
    pub site: SiteProbes,
}

/// Reject input the engine must not analyze at all.
pub(crate) fn validate_body(html: &str, options: &Options) -> Result<()> {
    if html.len() > options.max_content_bytes {
        return Err(Error::ContentTooLarge {
            size: html.len(),
            limit: options.max_content_bytes,
        });
    }

    let length = html.trim().chars().count();
    if length < options.min_body_chars {
        return Err(Error::ContentTooShort {
            length,
            minimum: options.min_body_chars,
        });
    }

    Ok(())
}

pub(crate) fn run(input: &PageInput<'_>, options: &Options) -> Result<AnalysisResult> {
    let url = parse_page_url(input.url)?;
    validate_body(input.html, options)?;

    let focus_keyword = input
        .focus_keyword
        .map(str::trim)
        .filter(|k| !k.is_empty());

    let html = content::neutralize_resources(input.html);
    let page = dom::parse(&html);
    let extracted = content::extract(&page, &html, options);
    log::debug!(
        "main content from {:?}: {} words",
        extracted.source,
        extracted.word_count()
    );
    let content_doc = dom::parse(&extracted.main_content_html);

    let (signals, warnings) = signals::collect(&CollectorInput {
        page: &page,
        content: &content_doc,
        extracted: &extracted,
        url: &url,
        focus_keyword,
        site: input.site,
        options,
    });

    let performance = PerformanceState::default();
    let breakdown = scoring::score(&signals, &performance);
    let recommendations = recommendations::generate(&signals, &performance);
    log::debug!(
        "scored {}: {:.1} points, {} recommendations",
        url,
        breakdown.total(),
        recommendations.len()
    );

    Ok(AnalysisResult {
        url: input.url.trim().to_string(),
        analyzed_at: Utc::now(),
        focus_keyword: focus_keyword.map(str::to_string),
        content_source: extracted.source,
        encoding: None,
        signals,
        breakdown,
        performance,
        recommendations,
        warnings,
    })
}
