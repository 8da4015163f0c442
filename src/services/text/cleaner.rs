use crate::services::core::BoundedCache;
use crate::services::text::normalizer::clean_text;

/// Default number of distinct raw strings kept by [`TextCleaner`].
pub const DEFAULT_CLEAN_CACHE_CAPACITY: usize = 1000;

/// `clean_text` behind a bounded cache keyed by the exact raw string.
#[derive(Debug)]
pub struct TextCleaner {
    cache: BoundedCache<String, String>,
}

impl TextCleaner {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: BoundedCache::new(capacity),
        }
    }

    /// Clean `raw`, or return the empty string for missing text.
    pub fn clean(&self, raw: Option<&str>) -> String {
        match raw {
            Some(text) if !text.is_empty() => self
                .cache
                .get_or_insert_with(text.to_string(), || clean_text(text)),
            _ => String::new(),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAN_CACHE_CAPACITY)
    }
}

#[cfg(test)]
#[path = "tests/cleaner_tests.rs"]
mod tests;
