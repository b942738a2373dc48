//! Time-bounded store of primary analyses.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::result::AnalysisResult;

/// Primary results keyed by normalized URL.
///
/// An entry is written once and read until it expires. Expired entries are
/// never returned and are replaced by the next insert.
#[derive(Debug)]
pub struct AnalysisCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, AnalysisResult)>,
}

impl AnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// The entry for `key`, if it is younger than the TTL at `now`.
    #[must_use]
    pub fn get(&self, key: &str, now: Instant) -> Option<&AnalysisResult> {
        self.entries
            .get(key)
            .filter(|(stored, _)| now.duration_since(*stored) < self.ttl)
            .map(|(_, result)| result)
    }

    /// Store `result`, dropping every expired entry.
    pub fn insert(&mut self, key: String, result: AnalysisResult, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (stored, _)| now.duration_since(*stored) < ttl);
        self.entries.insert(key, (now, result));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn result() -> AnalysisResult {
        let html = format!("<html><body><p>{}</p></body></html>", "Nội dung. ".repeat(20));
        crate::analyze(&html, "https://example.vn/", None).expect("valid page")
    }

    #[test]
    fn test_entry_expires() {
        let mut cache = AnalysisCache::new(Duration::from_secs(3600));
        let start = Instant::now();
        cache.insert("https://example.vn/".to_string(), result(), start);

        assert!(cache.get("https://example.vn/", start + Duration::from_secs(3599)).is_some());
        assert!(cache.get("https://example.vn/", start + Duration::from_secs(3600)).is_none());
    }

    #[test]
    fn test_insert_drops_expired() {
        let mut cache = AnalysisCache::new(Duration::from_secs(10));
        let start = Instant::now();
        cache.insert("a".to_string(), result(), start);
        cache.insert("b".to_string(), result(), start + Duration::from_secs(11));

        assert_eq!(cache.len(), 1);
        assert!(cache.get("a", start + Duration::from_secs(11)).is_none());
    }
}
