//! Scan cycle driver.
//!
//! One `process_scan_cycle` call:
//! 1. Drops repository entries whose side elements went stale
//! 2. Builds a component for every valid, visible altar container
//! 3. Inserts it (duplicates by identity key are rejected)
//! 4. Scores every stored altar once for the cycle

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use log::{debug, info, warn};

use crate::services::altar::{AltarComponent, AltarRepository, InsertOutcome, SideComponent};
use crate::services::catalog::EffectDatabase;
use crate::services::config::AltarSettings;
use crate::services::core::BoundedCache;
use crate::services::matcher::EffectMatcher;
use crate::services::scan::builder::ComponentBuilder;
use crate::services::scan::element::{ElementTree, Rect, Side};
use crate::services::scan::types::{ScanStats, UnmatchedEffect};
use crate::services::scoring::{AltarWeights, ScoringEngine, WeightLookup, WeightTable};
use crate::services::text::TextCleaner;
use crate::types::errors::AltarResult;

pub struct AltarScanner {
    tree: Arc<dyn ElementTree>,
    settings: AltarSettings,
    cleaner: TextCleaner,
    matcher: EffectMatcher,
    repository: AltarRepository,
    engine: ScoringEngine,
    cycle: AtomicU64,
    stats: Mutex<ScanStats>,
    /// Nearest-effect suggestion per unmatched line.
    suggestions: BoundedCache<String, Option<String>>,
    /// Build failures already logged at warn level.
    reported_failures: BoundedCache<String, ()>,
}

impl AltarScanner {
    pub fn new(
        tree: Arc<dyn ElementTree>,
        db: Arc<EffectDatabase>,
        weights: Arc<dyn WeightLookup>,
        settings: &AltarSettings,
    ) -> Self {
        Self {
            tree,
            settings: settings.clone(),
            cleaner: TextCleaner::new(settings.clean_cache_capacity),
            matcher: EffectMatcher::new(db, &settings.keywords, settings.match_cache_capacity),
            repository: AltarRepository::new(),
            engine: ScoringEngine::new(weights),
            cycle: AtomicU64::new(0),
            stats: Mutex::new(ScanStats::default()),
            suggestions: BoundedCache::new(settings.match_cache_capacity),
            reported_failures: BoundedCache::new(settings.match_cache_capacity),
        }
    }

    /// Scanner over the built-in catalog, weighted by catalog defaults plus
    /// the settings' overrides.
    pub fn from_settings(tree: Arc<dyn ElementTree>, settings: &AltarSettings) -> AltarResult<Self> {
        let db = Arc::new(EffectDatabase::builtin()?);
        let table = WeightTable::from_database(&db);
        table.apply_overrides(&settings.weight_overrides);
        Ok(Self::new(tree, db, Arc::new(table), settings))
    }

    pub fn settings(&self) -> &AltarSettings {
        &self.settings
    }

    pub fn matcher(&self) -> &EffectMatcher {
        &self.matcher
    }

    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    pub fn current_cycle(&self) -> u64 {
        self.cycle.load(Ordering::SeqCst)
    }

    fn stats_guard(&self) -> MutexGuard<'_, ScanStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one full pass and return its counters.
    pub fn process_scan_cycle(&self) -> ScanStats {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stats = ScanStats::new(cycle);
        stats.recent_unmatched = self.stats_guard().recent_unmatched.clone();

        let tree = self.tree.as_ref();
        stats.components_removed = self.repository.remove_where(|c| !c.is_valid(tree));

        let builder = ComponentBuilder {
            tree,
            cleaner: &self.cleaner,
            matcher: &self.matcher,
            paths: &self.settings.altar_paths,
            max_text_chars: self.settings.max_text_chars,
        };

        let containers = tree.altar_elements();
        stats.elements_found = containers.len();

        for container in containers {
            if !tree.is_valid(container) || !tree.is_visible(container) {
                continue;
            }

            let component = match builder.build(container) {
                Ok(component) => component,
                Err(e) => {
                    let message = e.to_string();
                    if self.reported_failures.insert_new(message.clone(), ()) {
                        warn!("[Scan] Skipping altar: {}", message);
                    } else {
                        debug!("[Scan] Skipping altar: {}", message);
                    }
                    stats.components_failed += 1;
                    continue;
                }
            };

            for side in [component.top(), component.bottom()] {
                self.record_effects(side, &mut stats);
            }

            match self.repository.insert(component) {
                InsertOutcome::Added => stats.components_added += 1,
                InsertOutcome::Duplicate => stats.components_duplicated += 1,
            }
        }

        for component in self.repository.snapshot() {
            self.engine.score_for_cycle(&component, cycle);
        }

        stats.finished_at = Some(Utc::now());
        debug!(
            "[Scan] Cycle {}: {} found, {} added, {} duplicate, {} failed, {} removed, {} unmatched",
            cycle,
            stats.elements_found,
            stats.components_added,
            stats.components_duplicated,
            stats.components_failed,
            stats.components_removed,
            stats.effects_unmatched
        );

        *self.stats_guard() = stats.clone();
        stats
    }

    fn record_effects(&self, side: &SideComponent, stats: &mut ScanStats) {
        stats.effects_matched += side.matched_count();
        stats.effects_unmatched += side.unmatched().len();

        for text in side.unmatched() {
            let suggestion = self.suggestion_for(text, side.descriptor());
            stats.push_unmatched(
                UnmatchedEffect {
                    descriptor: side.descriptor().to_string(),
                    text: text.clone(),
                    suggestion,
                },
                self.settings.recent_unmatched_limit,
            );
        }
    }

    /// Cached suggestion for an unmatched line. The first sighting of a line
    /// is logged; later cycles reuse the cached result silently.
    fn suggestion_for(&self, text: &str, descriptor: &str) -> Option<String> {
        if let Some(cached) = self.suggestions.get(text) {
            return cached;
        }
        let suggestion = self.matcher.suggest(text).map(|s| s.canonical_id);
        if self.suggestions.insert_new(text.to_string(), suggestion.clone()) {
            info!(
                "[Scan] Unmatched effect '{}' under '{}' (closest: {})",
                text,
                descriptor,
                suggestion.as_deref().unwrap_or("none")
            );
        }
        suggestion
    }

    /// Ordered snapshot of stored altars.
    pub fn components(&self) -> Vec<Arc<AltarComponent>> {
        self.repository.snapshot()
    }

    /// Scores for `component`, cached for the current cycle.
    pub fn weights(&self, component: &AltarComponent) -> AltarWeights {
        self.engine.score_for_cycle(component, self.current_cycle())
    }

    /// Click rectangle for one side, read from the host once and then cached
    /// on the side until the altar is removed.
    pub fn click_rect(&self, component: &AltarComponent, side: Side) -> Option<Rect> {
        let side_component = component.side(side);
        if let Some(rect) = side_component.cached_click_rect() {
            return Some(rect);
        }
        let rect = self.tree.rect(component.button(side)?)?;
        side_component.store_click_rect(rect);
        Some(rect)
    }

    /// Counters from the last completed cycle.
    pub fn stats(&self) -> ScanStats {
        self.stats_guard().clone()
    }

    /// Drop every stored altar.
    pub fn clear(&self) -> usize {
        self.repository.clear()
    }
}

#[cfg(test)]
#[path = "tests/cycle_tests.rs"]
mod tests;
