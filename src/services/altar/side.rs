//! One side (top or bottom choice) of an altar.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::services::catalog::TargetCategory;
use crate::services::matcher::EffectMatcher;
use crate::services::scan::element::{ElementId, Rect};
use crate::services::scoring::SideWeights;
use crate::services::text::normalizer::split_descriptor;

/// Slots per polarity per side. Matches beyond this are dropped.
pub const MAX_EFFECTS_PER_POLARITY: usize = 8;

/// Slots with individually exposed weights.
pub const LEADING_SLOTS: usize = 4;

/// Per-side derived state, released when the altar leaves the repository.
#[derive(Debug, Default)]
struct SideCache {
    cycle: u64,
    weights: Option<SideWeights>,
    click_rect: Option<Rect>,
}

/// Matched effects for one side. Slot contents are fixed at creation; changed
/// text produces a new component.
#[derive(Debug)]
pub struct SideComponent {
    element: ElementId,
    descriptor: String,
    target: Option<TargetCategory>,
    upsides: Vec<String>,
    downsides: Vec<String>,
    unmatched: Vec<String>,
    matched_count: usize,
    cache: Mutex<SideCache>,
}

impl SideComponent {
    /// Match every effect line of `cleaned` and fill the slots.
    pub fn build(element: ElementId, cleaned: &str, matcher: &EffectMatcher) -> Self {
        let (descriptor, candidates) = split_descriptor(cleaned);
        let mut upsides = Vec::new();
        let mut downsides = Vec::new();
        let mut unmatched = Vec::new();
        let mut matched_count = 0;

        for candidate in candidates {
            let result = matcher.match_effect(candidate, descriptor);
            if !result.matched {
                unmatched.push(candidate.to_string());
                continue;
            }
            matched_count += 1;

            let slots = if result.is_upside {
                &mut upsides
            } else {
                &mut downsides
            };
            if slots.len() < MAX_EFFECTS_PER_POLARITY {
                slots.push(result.canonical_id);
            } else {
                debug!(
                    "[Altar] Side {} has more than {} effects of one polarity, dropping {}",
                    element, MAX_EFFECTS_PER_POLARITY, result.canonical_id
                );
            }
        }

        Self {
            element,
            descriptor: descriptor.to_string(),
            target: matcher.classify(descriptor),
            upsides,
            downsides,
            unmatched,
            matched_count,
            cache: Mutex::new(SideCache::default()),
        }
    }

    /// Side with pre-resolved canonical ids, truncated to the slot limit.
    pub fn from_ids(element: ElementId, upsides: Vec<String>, downsides: Vec<String>) -> Self {
        let mut upsides = upsides;
        let mut downsides = downsides;
        upsides.truncate(MAX_EFFECTS_PER_POLARITY);
        downsides.truncate(MAX_EFFECTS_PER_POLARITY);
        let matched_count = upsides.len() + downsides.len();
        Self {
            element,
            descriptor: String::new(),
            target: None,
            upsides,
            downsides,
            unmatched: Vec::new(),
            matched_count,
            cache: Mutex::new(SideCache::default()),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn target(&self) -> Option<TargetCategory> {
        self.target
    }

    pub fn upsides(&self) -> &[String] {
        &self.upsides
    }

    pub fn downsides(&self) -> &[String] {
        &self.downsides
    }

    /// Upside in 1-based slot `n`, or `""` for an empty or out-of-range slot.
    pub fn upside(&self, n: usize) -> &str {
        slot(&self.upsides, n)
    }

    /// Downside in 1-based slot `n`, or `""` for an empty or out-of-range slot.
    pub fn downside(&self, n: usize) -> &str {
        slot(&self.downsides, n)
    }

    /// Upsides after the leading four slots.
    pub fn remaining_upsides(&self) -> &[String] {
        self.upsides.get(LEADING_SLOTS..).unwrap_or(&[])
    }

    pub fn remaining_downsides(&self) -> &[String] {
        self.downsides.get(LEADING_SLOTS..).unwrap_or(&[])
    }

    /// All upside slots, empty slots as `""`.
    pub fn upside_slots(&self) -> [&str; MAX_EFFECTS_PER_POLARITY] {
        std::array::from_fn(|i| self.upside(i + 1))
    }

    pub fn downside_slots(&self) -> [&str; MAX_EFFECTS_PER_POLARITY] {
        std::array::from_fn(|i| self.downside(i + 1))
    }

    pub fn has_unmatched_effects(&self) -> bool {
        !self.unmatched.is_empty()
    }

    /// Effect lines that matched nothing in the catalog.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Matched lines, including ones dropped past the slot limit.
    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    // ─── Cached State ────────────────────────────────────────────────────

    fn cache(&self) -> MutexGuard<'_, SideCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Weights computed during `cycle`, if any.
    pub fn cached_weights(&self, cycle: u64) -> Option<SideWeights> {
        let cache = self.cache();
        if cache.cycle == cycle {
            cache.weights
        } else {
            None
        }
    }

    pub fn store_weights(&self, cycle: u64, weights: SideWeights) {
        let mut cache = self.cache();
        cache.cycle = cycle;
        cache.weights = Some(weights);
    }

    pub fn cached_click_rect(&self) -> Option<Rect> {
        self.cache().click_rect
    }

    pub fn store_click_rect(&self, rect: Rect) {
        self.cache().click_rect = Some(rect);
    }

    pub fn has_cached_state(&self) -> bool {
        let cache = self.cache();
        cache.weights.is_some() || cache.click_rect.is_some()
    }

    /// Drop cached weights and rectangle.
    pub fn invalidate(&self) {
        *self.cache() = SideCache::default();
    }
}

fn slot(values: &[String], n: usize) -> &str {
    n.checked_sub(1)
        .and_then(|index| values.get(index))
        .map(String::as_str)
        .unwrap_or("")
}

#[cfg(test)]
#[path = "tests/side_tests.rs"]
mod tests;
