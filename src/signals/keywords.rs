//! Keyword profile: n-gram frequencies and keyword placement.
//!
//! Tokens are stripped to Unicode letters and digits, so Vietnamese
//! diacritics survive (`máy tính` stays `máy tính`). Stop words and tokens
//! of two characters or fewer are dropped before n-grams are built, which
//! means a bigram can join two words that had a stop word between them.

use std::collections::HashMap;

use serde::Serialize;

use crate::patterns::{is_stop_word, NON_WORD_CHAR, SENTENCE_END};

/// Words at the start of the content treated as the opening paragraph.
const OPENING_WORDS: usize = 100;
/// Words at the end of the content treated as the closing paragraph.
const CLOSING_WORDS: usize = 50;
/// Title prefix, in characters, that counts as "start of title".
const TITLE_START_CHARS: usize = 60;

/// Phrase length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NGram {
    Unigram = 1,
    Bigram = 2,
    Trigram = 3,
}

/// One ranked phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordPhrase {
    /// Lowercased phrase, the matching key.
    pub phrase: String,
    /// First occurrence as written (punctuation stripped).
    pub original: String,
    /// Phrase length.
    pub kind: NGram,
    /// Occurrences.
    pub count: usize,
    /// Occurrences per 100 words, two decimals.
    pub density: f64,
}

/// Where a phrase appears on the page, with its usage score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordUsage {
    pub phrase: String,
    pub count: usize,
    pub density: f64,
    pub in_title: bool,
    pub in_title_start: bool,
    pub in_meta_description: bool,
    pub in_h1: bool,
    pub in_url: bool,
    pub in_first_100_words: bool,
    /// 0 to 3, higher when the phrase first appears earlier in the text.
    pub prominence: u8,
    /// 0 to 2, multi-word phrases whose words sit close together.
    pub proximity: u8,
    pub usage_score: u32,
}

/// Placement of a caller-supplied focus keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusKeywordReport {
    pub keyword: String,
    pub count: usize,
    pub density: f64,
    pub in_title: bool,
    pub in_title_start: bool,
    pub in_meta_description: bool,
    pub in_h1: bool,
    pub in_url: bool,
    pub in_first_100_words: bool,
    pub in_first_sentence: bool,
    pub in_last_paragraph: bool,
}

/// Frequency table and usage of the main content's phrases.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordProfile {
    /// Merged ranking: count descending, longer phrase first on ties.
    pub phrases: Vec<KeywordPhrase>,
    /// Usage of the top phrases, usage score descending.
    pub usage: Vec<KeywordUsage>,
    /// Focus keyword placement, when one was supplied.
    pub focus: Option<FocusKeywordReport>,
}

impl KeywordProfile {
    /// Highest-scoring phrase by usage.
    #[must_use]
    pub fn top_usage(&self) -> Option<&KeywordUsage> {
        self.usage.first()
    }

    /// The keyword links are judged against: the focus keyword if given,
    /// otherwise the top usage phrase.
    #[must_use]
    pub fn target_keyword(&self) -> Option<&str> {
        self.focus
            .as_ref()
            .map(|f| f.keyword.as_str())
            .or_else(|| self.top_usage().map(|u| u.phrase.as_str()))
    }
}

/// Page texts that keyword placement is checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placement<'a> {
    pub title: &'a str,
    pub meta_description: &'a str,
    pub first_h1: &'a str,
    pub url: &'a str,
}

/// Lowercased views shared by the usage and focus checks.
struct Haystacks {
    text: String,
    text_chars: usize,
    title: String,
    meta: String,
    h1: String,
    url: String,
    opening: String,
    closing: String,
    first_sentence: String,
    word_count: usize,
}

impl Haystacks {
    fn new(text: &str, words: &[String], placement: &Placement<'_>) -> Self {
        let text = text.to_lowercase();
        let first_sentence = SENTENCE_END
            .split(&text)
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or_default()
            .to_string();

        Self {
            text_chars: text.chars().count(),
            title: placement.title.to_lowercase(),
            meta: placement.meta_description.to_lowercase(),
            h1: placement.first_h1.to_lowercase(),
            url: placement.url.to_lowercase(),
            opening: words[..words.len().min(OPENING_WORDS)].join(" ").to_lowercase(),
            closing: words[words.len().saturating_sub(CLOSING_WORDS)..]
                .join(" ")
                .to_lowercase(),
            first_sentence,
            word_count: words.len(),
            text,
        }
    }

    fn density(&self, count: usize) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        (count as f64 / self.word_count as f64 * 10_000.0).round() / 100.0
    }

    fn in_title_start(&self, keyword: &str) -> bool {
        char_index(&self.title, keyword).is_some_and(|i| i < TITLE_START_CHARS)
    }

    /// URLs spell phrases with hyphens, so `may tinh` also matches `may-tinh`.
    fn in_url(&self, keyword: &str) -> bool {
        self.url.contains(keyword) || self.url.contains(&keyword.replace(' ', "-"))
    }

    fn prominence(&self, keyword: &str) -> u8 {
        let Some(index) = char_index(&self.text, keyword) else {
            return 0;
        };
        let ratio = index as f64 / self.text_chars.max(1) as f64;
        if ratio <= 0.1 {
            3
        } else if ratio <= 0.25 {
            2
        } else {
            u8::from(ratio <= 0.5)
        }
    }

    fn proximity(&self, keyword: &str) -> u8 {
        let mut parts = keyword.split_whitespace();
        let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
            return 0;
        };
        let Some(first_at) = self.text.find(first) else {
            return 0;
        };
        let Some(offset) = self.text[first_at..].find(second) else {
            return 0;
        };

        let distance = self.text[first_at..first_at + offset].chars().count();
        if distance <= 50 {
            2
        } else {
            u8::from(distance <= 100)
        }
    }
}

/// Character index of the first occurrence of `needle` in `haystack`.
fn char_index(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte| haystack[..byte].chars().count())
}

/// Build the keyword profile of the main content.
#[must_use]
pub fn collect(
    text: &str,
    words: &[String],
    placement: &Placement<'_>,
    focus_keyword: Option<&str>,
    phrase_limit: usize,
    usage_limit: usize,
) -> KeywordProfile {
    let haystacks = Haystacks::new(text, words, placement);
    let phrases = rank_phrases(words, &haystacks, phrase_limit);

    let mut usage: Vec<KeywordUsage> = phrases
        .iter()
        .take(usage_limit)
        .map(|p| keyword_usage(p, &haystacks))
        .collect();
    usage.sort_by(|a, b| b.usage_score.cmp(&a.usage_score));

    let focus = focus_keyword
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .map(|k| focus_report(k, &haystacks));

    KeywordProfile {
        phrases,
        usage,
        focus,
    }
}

fn rank_phrases(words: &[String], haystacks: &Haystacks, limit: usize) -> Vec<KeywordPhrase> {
    let tokens: Vec<(String, String)> = words
        .iter()
        .filter_map(|word| {
            let cleaned = NON_WORD_CHAR.replace_all(word, "").into_owned();
            let lower = cleaned.to_lowercase();
            (cleaned.chars().count() > 2 && !is_stop_word(&lower)).then_some((lower, cleaned))
        })
        .collect();

    let mut ranked = Vec::new();
    for kind in [NGram::Unigram, NGram::Bigram, NGram::Trigram] {
        let n = kind as usize;
        let min_count = if kind == NGram::Unigram { 1 } else { 2 };

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut table: Vec<KeywordPhrase> = Vec::new();
        for window in tokens.windows(n) {
            let phrase = window.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>().join(" ");
            if let Some(&i) = index.get(&phrase) {
                table[i].count += 1;
            } else {
                index.insert(phrase.clone(), table.len());
                table.push(KeywordPhrase {
                    original: window.iter().map(|(_, o)| o.as_str()).collect::<Vec<_>>().join(" "),
                    phrase,
                    kind,
                    count: 1,
                    density: 0.0,
                });
            }
        }

        ranked.extend(table.into_iter().filter(|p| p.count >= min_count));
    }

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(b.kind.cmp(&a.kind)));
    ranked.truncate(limit);
    for phrase in &mut ranked {
        phrase.density = haystacks.density(phrase.count);
    }
    ranked
}

fn keyword_usage(phrase: &KeywordPhrase, h: &Haystacks) -> KeywordUsage {
    let kw = phrase.phrase.as_str();
    let in_title = h.title.contains(kw);
    let in_title_start = h.in_title_start(kw);
    let in_meta_description = h.meta.contains(kw);
    let in_h1 = h.h1.contains(kw);
    let in_url = h.in_url(kw);
    let in_first_100_words = h.opening.contains(kw);
    let prominence = h.prominence(kw);
    let proximity = h.proximity(kw);

    let usage_score = 3 * u32::from(in_title)
        + u32::from(in_title_start)
        + 2 * u32::from(in_meta_description)
        + 2 * u32::from(in_h1)
        + u32::from(in_url)
        + 2 * u32::from(in_first_100_words)
        + u32::from(prominence)
        + u32::from(proximity);

    KeywordUsage {
        phrase: phrase.phrase.clone(),
        count: phrase.count,
        density: phrase.density,
        in_title,
        in_title_start,
        in_meta_description,
        in_h1,
        in_url,
        in_first_100_words,
        prominence,
        proximity,
        usage_score,
    }
}

fn focus_report(keyword: String, h: &Haystacks) -> FocusKeywordReport {
    let count = h.text.matches(keyword.as_str()).count();
    FocusKeywordReport {
        count,
        density: h.density(count),
        in_title: h.title.contains(&keyword),
        in_title_start: h.in_title_start(&keyword),
        in_meta_description: h.meta.contains(&keyword),
        in_h1: h.h1.contains(&keyword),
        in_url: h.in_url(&keyword),
        in_first_100_words: h.opening.contains(&keyword),
        in_first_sentence: h.first_sentence.contains(&keyword),
        in_last_paragraph: h.closing.contains(&keyword),
        keyword,
    }
}
