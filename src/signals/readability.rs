//! Flesch Reading Ease with a Vietnamese-aware syllable estimate.
//!
//! Vietnamese is monosyllabic per written word, but counting vowel clusters
//! over the diacritic alphabet handles mixed text and loanwords the same way
//! as the English heuristic handles Latin words.

use serde::Serialize;

use crate::patterns::{
    ENGLISH_SILENT_SUFFIX, ENGLISH_VOWEL_GROUP, NON_SYLLABLE_CHAR, NUMERIC_FRAGMENT, SENTENCE_END,
    VIETNAMESE_LETTERS, VIETNAMESE_VOWEL_GROUP,
};

/// Readability metrics of the main content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadabilityReport {
    /// Sentences after dropping short and numeric fragments.
    pub sentence_count: usize,
    /// Whitespace tokens.
    pub word_count: usize,
    /// Average words per sentence, one decimal.
    pub avg_words_per_sentence: f64,
    /// Average syllables per word with letters, two decimals.
    pub avg_syllables_per_word: f64,
    /// Flesch Reading Ease clamped to 0..=100, one decimal.
    pub flesch_score: f64,
}

/// Compute readability for `text`, whose whitespace tokens are `words`.
#[must_use]
pub fn analyze(text: &str, words: &[String]) -> ReadabilityReport {
    let sentence_count = SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() >= 3 && !NUMERIC_FRAGMENT.is_match(s))
        .count();
    let word_count = words.len();

    let (syllables, counted) = words
        .iter()
        .map(|word| NON_SYLLABLE_CHAR.replace_all(&word.to_lowercase(), "").into_owned())
        .filter(|clean| !clean.is_empty())
        .fold((0usize, 0usize), |(total, n), clean| (total + count_syllables(&clean), n + 1));

    let avg_syllables = if counted > 0 {
        syllables as f64 / counted as f64
    } else {
        0.0
    };

    if word_count == 0 || sentence_count == 0 {
        return ReadabilityReport {
            sentence_count,
            word_count,
            avg_syllables_per_word: round_to(avg_syllables, 2),
            ..ReadabilityReport::default()
        };
    }

    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let flesch = 206.835 - 1.015 * words_per_sentence - 84.6 * avg_syllables;

    ReadabilityReport {
        sentence_count,
        word_count,
        avg_words_per_sentence: round_to(words_per_sentence, 1),
        avg_syllables_per_word: round_to(avg_syllables, 2),
        flesch_score: round_to(flesch, 1).clamp(0.0, 100.0),
    }
}

/// Syllable estimate for one lowercased, cleaned word.
#[must_use]
pub fn count_syllables(word: &str) -> usize {
    if word.chars().any(|c| VIETNAMESE_LETTERS.contains(c)) {
        return VIETNAMESE_VOWEL_GROUP.find_iter(word).count().max(1);
    }

    if word.chars().count() <= 3 {
        return 1;
    }

    let stripped = ENGLISH_SILENT_SUFFIX.replace(word, "");
    let stripped = stripped.strip_prefix('y').unwrap_or(&stripped);
    ENGLISH_VOWEL_GROUP.find_iter(stripped).count().max(1)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
