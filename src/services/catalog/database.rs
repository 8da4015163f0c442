use std::collections::{HashMap, HashSet};

use log::{debug, info};
use serde::Deserialize;

use super::models::{EffectDefinition, Polarity, TargetCategory};
use crate::services::text::normalizer::letters_only;
use crate::types::errors::{AltarError, AltarResult};

/// Catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../../resources/effects.json");

/// Accepted range for `EffectDefinition::default_weight`.
pub const MIN_DEFAULT_WEIGHT: i32 = 1;
pub const MAX_DEFAULT_WEIGHT: i32 = 100;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    upsides: Vec<EffectDefinition>,
    #[serde(default)]
    downsides: Vec<EffectDefinition>,
}

/// Read-only catalog of known upside and downside effects.
///
/// Built once at startup. Lookups go through a hash index keyed by the
/// letters-only form of the id plus its target, which returns the same entry
/// a linear scan of upsides-then-downsides would hit first.
#[derive(Debug, Clone)]
pub struct EffectDatabase {
    upsides: Vec<EffectDefinition>,
    downsides: Vec<EffectDefinition>,
    index: HashMap<(String, TargetCategory), (Polarity, usize)>,
}

impl EffectDatabase {
    /// Build a database, rejecting duplicate `(id, target)` pairs and weights
    /// outside `1..=100`.
    pub fn new(
        upsides: Vec<EffectDefinition>,
        downsides: Vec<EffectDefinition>,
    ) -> AltarResult<Self> {
        let mut seen: HashSet<(&str, TargetCategory)> = HashSet::new();
        let lists = [(Polarity::Upside, &upsides), (Polarity::Downside, &downsides)];

        for (polarity, list) in lists {
            for def in list.iter() {
                if !(MIN_DEFAULT_WEIGHT..=MAX_DEFAULT_WEIGHT).contains(&def.default_weight) {
                    return Err(AltarError::WeightOutOfRange {
                        id: def.id.clone(),
                        weight: def.default_weight,
                    });
                }
                if def.id.trim().is_empty() {
                    return Err(AltarError::Catalog(format!(
                        "{polarity} effect with empty id for target {}",
                        def.target_category
                    )));
                }
                if !seen.insert((def.id.as_str(), def.target_category)) {
                    return Err(AltarError::DuplicateEffect {
                        polarity,
                        category: def.target_category,
                        id: def.id.clone(),
                    });
                }
            }
        }

        let mut index = HashMap::with_capacity(upsides.len() + downsides.len());
        for (polarity, list) in [(Polarity::Upside, &upsides), (Polarity::Downside, &downsides)] {
            for (position, def) in list.iter().enumerate() {
                let key = (letters_only(&def.id), def.target_category);
                if index.contains_key(&key) {
                    debug!(
                        "[Catalog] '{}' ({}) reduces to an existing key, earlier entry wins",
                        def.id, def.target_category
                    );
                    continue;
                }
                index.insert(key, (polarity, position));
            }
        }

        Ok(Self {
            upsides,
            downsides,
            index,
        })
    }

    /// Parse a catalog from `{"upsides": [...], "downsides": [...]}`.
    pub fn from_json(json: &str) -> AltarResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| AltarError::Catalog(format!("Failed to parse catalog JSON: {e}")))?;
        Self::new(file.upsides, file.downsides)
    }

    /// The catalog embedded in the crate.
    pub fn builtin() -> AltarResult<Self> {
        let db = Self::from_json(BUILTIN_CATALOG)?;
        info!(
            "[Catalog] Loaded {} upsides and {} downsides",
            db.upsides.len(),
            db.downsides.len()
        );
        Ok(db)
    }

    pub fn upsides(&self) -> &[EffectDefinition] {
        &self.upsides
    }

    pub fn downsides(&self) -> &[EffectDefinition] {
        &self.downsides
    }

    pub fn by_polarity(&self, polarity: Polarity) -> &[EffectDefinition] {
        match polarity {
            Polarity::Upside => &self.upsides,
            Polarity::Downside => &self.downsides,
        }
    }

    /// Every definition, upsides first, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Polarity, &EffectDefinition)> {
        self.upsides
            .iter()
            .map(|def| (Polarity::Upside, def))
            .chain(self.downsides.iter().map(|def| (Polarity::Downside, def)))
    }

    /// Exact lookup by letters-only id (lowercase) and target.
    pub fn find(
        &self,
        reduced_id: &str,
        category: TargetCategory,
    ) -> Option<(Polarity, &EffectDefinition)> {
        let (polarity, position) = *self.index.get(&(reduced_id.to_string(), category))?;
        self.by_polarity(polarity)
            .get(position)
            .map(|def| (polarity, def))
    }

    pub fn len(&self) -> usize {
        self.upsides.len() + self.downsides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "tests/database_tests.rs"]
mod tests;
