use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::altar::AltarPathFragments;
use crate::services::matcher::effect_matcher::DEFAULT_MATCH_CACHE_CAPACITY;
use crate::services::matcher::TargetKeywords;
use crate::services::text::cleaner::DEFAULT_CLEAN_CACHE_CAPACITY;

/// Default host text read limit, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 2048;

/// Default length of the rolling recent-unmatched list.
pub const DEFAULT_RECENT_UNMATCHED_LIMIT: usize = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AltarSettings {
    pub clean_cache_capacity: usize,
    pub match_cache_capacity: usize,
    pub max_text_chars: usize,
    pub recent_unmatched_limit: usize,
    pub keywords: TargetKeywords,
    pub altar_paths: AltarPathFragments,
    /// Canonical id → weight, applied over catalog defaults.
    pub weight_overrides: BTreeMap<String, i32>,
}

impl Default for AltarSettings {
    fn default() -> Self {
        Self {
            clean_cache_capacity: DEFAULT_CLEAN_CACHE_CAPACITY,
            match_cache_capacity: DEFAULT_MATCH_CACHE_CAPACITY,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            recent_unmatched_limit: DEFAULT_RECENT_UNMATCHED_LIMIT,
            keywords: TargetKeywords::default(),
            altar_paths: AltarPathFragments::default(),
            weight_overrides: BTreeMap::new(),
        }
    }
}

impl AltarSettings {
    /// Reject values the scanner cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_chars == 0 {
            return Err("max_text_chars must be greater than zero".into());
        }
        if let Some((id, weight)) = self.weight_overrides.iter().find(|(_, w)| **w < 0) {
            return Err(format!("weight override for '{id}' is negative ({weight})"));
        }
        Ok(())
    }
}
