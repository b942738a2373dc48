//! Obsolete markup detection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom::Document;
use crate::patterns::DEPRECATED_TAGS;

/// Obsolete tags present on the page, with their counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeprecatedMarkup {
    pub tags: BTreeMap<&'static str, usize>,
}

impl DeprecatedMarkup {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.tags.is_empty()
    }

    /// Total obsolete elements.
    #[must_use]
    pub fn total(&self) -> usize {
        self.tags.values().sum()
    }
}

#[must_use]
pub fn collect(page: &Document) -> DeprecatedMarkup {
    let tags = DEPRECATED_TAGS
        .iter()
        .filter_map(|&tag| {
            let count = page.select(tag).length();
            (count > 0).then_some((tag, count))
        })
        .collect();
    DeprecatedMarkup { tags }
}
