//! Per-effect weight table.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::services::catalog::EffectDatabase;

/// Weight of any canonical id the table does not know.
pub const DEFAULT_WEIGHT: i32 = 1;

/// Source of effect weights for scoring.
///
/// Weights are used as returned for upsides. The scorer treats negative
/// downside weights as zero to keep the downside floor.
pub trait WeightLookup: Send + Sync {
    fn weight(&self, canonical_id: &str) -> i32;
}

impl WeightLookup for HashMap<String, i32> {
    fn weight(&self, canonical_id: &str) -> i32 {
        self.get(canonical_id).copied().unwrap_or(DEFAULT_WEIGHT)
    }
}

/// User-adjustable weights keyed by canonical id (`"{target}|{id}"`).
///
/// Two layers: seeded defaults, fixed at construction, and runtime overrides
/// on top. Resetting an override falls back to the seeded value.
#[derive(Debug, Default)]
pub struct WeightTable {
    defaults: HashMap<String, i32>,
    overrides: Mutex<HashMap<String, i32>>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with every catalog entry's default weight.
    pub fn from_database(db: &EffectDatabase) -> Self {
        let defaults = db
            .iter()
            .map(|(_, def)| (def.canonical_id(), def.default_weight))
            .collect();
        Self {
            defaults,
            overrides: Mutex::new(HashMap::new()),
        }
    }

    fn overrides(&self) -> MutexGuard<'_, HashMap<String, i32>> {
        self.overrides.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_weight(&self, canonical_id: impl Into<String>, weight: i32) {
        self.overrides().insert(canonical_id.into(), weight);
    }

    /// Drop an override and return it. The id falls back to its seeded
    /// default, or [`DEFAULT_WEIGHT`] when it has none.
    pub fn reset_weight(&self, canonical_id: &str) -> Option<i32> {
        self.overrides().remove(canonical_id)
    }

    pub fn apply_overrides(&self, overrides: &BTreeMap<String, i32>) {
        if overrides.is_empty() {
            return;
        }
        let mut current = self.overrides();
        for (id, weight) in overrides {
            current.insert(id.clone(), *weight);
        }
        debug!("[Weights] Applied {} overrides", overrides.len());
    }

    /// Seeded weight for an id, ignoring overrides.
    pub fn default_weight(&self, canonical_id: &str) -> i32 {
        self.defaults
            .get(canonical_id)
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    /// Sorted copy of the overrides alone, e.g. for persisting to settings.
    pub fn overrides_snapshot(&self) -> BTreeMap<String, i32> {
        self.overrides()
            .iter()
            .map(|(id, weight)| (id.clone(), *weight))
            .collect()
    }

    /// Sorted copy of every effective weight.
    pub fn snapshot(&self) -> BTreeMap<String, i32> {
        let mut merged: BTreeMap<String, i32> = self
            .defaults
            .iter()
            .map(|(id, weight)| (id.clone(), *weight))
            .collect();
        merged.extend(self.overrides_snapshot());
        merged
    }

    pub fn len(&self) -> usize {
        let overrides = self.overrides();
        self.defaults.len()
            + overrides
                .keys()
                .filter(|id| !self.defaults.contains_key(*id))
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WeightLookup for WeightTable {
    fn weight(&self, canonical_id: &str) -> i32 {
        if let Some(weight) = self.overrides().get(canonical_id) {
            return *weight;
        }
        self.default_weight(canonical_id)
    }
}

#[cfg(test)]
#[path = "tests/weights_tests.rs"]
mod tests;
