//! Exact effect matcher with a bounded result cache.
//!
//! **Algorithm:**
//! 1. Reduce candidate and descriptor to lowercase letters
//! 2. Classify the descriptor into a target (boss → minion → player)
//! 3. Look up `(reduced candidate, target)` in the catalog, upsides first
//! 4. Return `"{target}|{id}"` on an exact hit; substrings never match

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::services::catalog::{EffectDatabase, Polarity, TargetCategory};
use crate::services::core::BoundedCache;
use crate::services::matcher::target::TargetKeywords;
use crate::services::text::normalizer::letters_only;

/// Default number of `(candidate, descriptor)` pairs kept by the match cache.
pub const DEFAULT_MATCH_CACHE_CAPACITY: usize = 5000;

/// Minimum normalized Levenshtein similarity for a diagnostic suggestion.
const SUGGESTION_MIN_SIMILARITY: f64 = 0.6;

// ─── Result Types ────────────────────────────────────────────────────────────

/// Outcome of matching one effect line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched: bool,
    pub is_upside: bool,
    /// `"{target}|{id}"` when matched, empty otherwise.
    pub canonical_id: String,
}

impl MatchResult {
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn polarity(&self) -> Option<Polarity> {
        match (self.matched, self.is_upside) {
            (false, _) => None,
            (true, true) => Some(Polarity::Upside),
            (true, false) => Some(Polarity::Downside),
        }
    }
}

/// Closest known effect for a line that did not match. Diagnostics only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub canonical_id: String,
    pub similarity: f64,
}

// ─── Matcher ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct EffectMatcher {
    db: Arc<EffectDatabase>,
    keywords: TargetKeywords,
    cache: BoundedCache<String, MatchResult>,
}

impl EffectMatcher {
    pub fn new(db: Arc<EffectDatabase>, keywords: &TargetKeywords, cache_capacity: usize) -> Self {
        Self {
            db,
            keywords: keywords.normalized(),
            cache: BoundedCache::new(cache_capacity),
        }
    }

    pub fn with_defaults(db: Arc<EffectDatabase>) -> Self {
        Self::new(db, &TargetKeywords::default(), DEFAULT_MATCH_CACHE_CAPACITY)
    }

    pub fn database(&self) -> &EffectDatabase {
        &self.db
    }

    /// Target category of a descriptor line, if any keyword is present.
    pub fn classify(&self, descriptor: &str) -> Option<TargetCategory> {
        self.keywords.classify_reduced(&letters_only(descriptor))
    }

    /// Match one effect line against the catalog.
    ///
    /// Never fails: empty or unrecognized input yields an unmatched result.
    pub fn match_effect(&self, candidate: &str, descriptor: &str) -> MatchResult {
        let key = cache_key(candidate, descriptor);

        if let Some(hit) = self.cache.get(&key) {
            return self.migrate_cached(key, hit, candidate, descriptor);
        }

        let result = self.compute(candidate, descriptor);
        self.cache.insert(key, result.clone());
        result
    }

    /// Pre-load a cache entry, e.g. from a persisted cache.
    ///
    /// Entries whose canonical id lacks its `"{target}|"` prefix are accepted
    /// and repaired the first time they are read.
    pub fn seed(&self, candidate: &str, descriptor: &str, result: MatchResult) -> bool {
        self.cache.insert(cache_key(candidate, descriptor), result)
    }

    /// Raw cache entry for a pair, without repair.
    pub fn cached(&self, candidate: &str, descriptor: &str) -> Option<MatchResult> {
        self.cache.get(&cache_key(candidate, descriptor))
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Nearest catalog effect to an unmatched line, by normalized Levenshtein
    /// distance over letters-only ids. Never used to produce a match.
    pub fn suggest(&self, candidate: &str) -> Option<Suggestion> {
        let reduced = letters_only(candidate);
        if reduced.is_empty() {
            return None;
        }

        self.db
            .iter()
            .map(|(_, def)| {
                let similarity = strsim::normalized_levenshtein(&reduced, &letters_only(&def.id));
                (similarity, def)
            })
            .filter(|(similarity, _)| *similarity >= SUGGESTION_MIN_SIMILARITY)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(similarity, def)| Suggestion {
                canonical_id: def.canonical_id(),
                similarity,
            })
    }

    /// Cache-hit path. Legacy entries stored before canonical ids carried a
    /// target prefix get the prefix from the current descriptor and are written
    /// back in the new form.
    fn migrate_cached(
        &self,
        key: String,
        hit: MatchResult,
        candidate: &str,
        descriptor: &str,
    ) -> MatchResult {
        if !hit.matched || hit.canonical_id.is_empty() || has_target_prefix(&hit.canonical_id) {
            return hit;
        }

        let Some(category) = self.classify(descriptor) else {
            debug!(
                "[Matcher] Legacy cache entry '{}' has no resolvable target, recomputing",
                hit.canonical_id
            );
            let fresh = self.compute(candidate, descriptor);
            self.cache.insert(key, fresh.clone());
            return fresh;
        };

        let repaired = MatchResult {
            canonical_id: format!("{}|{}", category, hit.canonical_id),
            ..hit
        };
        debug!("[Matcher] Repaired legacy cache entry → {}", repaired.canonical_id);
        self.cache.insert(key, repaired.clone());
        repaired
    }

    fn compute(&self, candidate: &str, descriptor: &str) -> MatchResult {
        let reduced = letters_only(candidate);
        if reduced.is_empty() {
            return MatchResult::unmatched();
        }

        let Some(category) = self.classify(descriptor) else {
            #[cfg(feature = "debug_matcher")]
            debug!(
                "[Matcher] no_target | candidate={:?} descriptor={:?}",
                candidate, descriptor
            );
            return MatchResult::unmatched();
        };

        match self.db.find(&reduced, category) {
            Some((polarity, def)) => {
                #[cfg(feature = "debug_matcher")]
                debug!(
                    "[Matcher] hit | candidate={:?} target={} polarity={} id={:?}",
                    candidate, category, polarity, def.id
                );
                MatchResult {
                    matched: true,
                    is_upside: polarity == Polarity::Upside,
                    canonical_id: def.canonical_id(),
                }
            }
            None => {
                #[cfg(feature = "debug_matcher")]
                debug!(
                    "[Matcher] miss | candidate={:?} target={} reduced={:?}",
                    candidate, category, reduced
                );
                MatchResult::unmatched()
            }
        }
    }
}

fn cache_key(candidate: &str, descriptor: &str) -> String {
    format!("{candidate}|{descriptor}")
}

fn has_target_prefix(canonical_id: &str) -> bool {
    TargetCategory::ALL
        .iter()
        .any(|category| canonical_id.starts_with(&category.canonical_prefix()))
}

#[cfg(test)]
#[path = "tests/effect_matcher_tests.rs"]
mod tests;
