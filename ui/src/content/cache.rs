//! Per-widget memo of fetched content.

use std::collections::HashMap;

use api::ConceptPayload;

use crate::core::navigation::ConceptId;

#[derive(Debug, Clone, PartialEq)]
pub enum CachedContent {
    /// Raw overview text, split into paragraphs at render time.
    Overview(String),
    Concept(ConceptPayload),
}

/// Unbounded map from identifier to payload. Entries live as long as the
/// widget; only successful fetches are stored.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<ConceptId, CachedContent>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&CachedContent> {
        self.entries.get(id)
    }

    pub fn put(&mut self, id: ConceptId, content: CachedContent) {
        self.entries.insert(id, content);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_use_the_exact_identifier() {
        let mut cache = ContentCache::new();
        cache.put(
            ConceptId::new("dot-product"),
            CachedContent::Concept(ConceptPayload {
                name: Some("Dot Product".into()),
                ..Default::default()
            }),
        );
        cache.put(ConceptId::overview(), CachedContent::Overview("Hi".into()));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("dot-product").is_some());
        assert!(cache.get("Dot-Product").is_none());
        assert_eq!(
            cache.get("overview"),
            Some(&CachedContent::Overview("Hi".into()))
        );
    }
}
