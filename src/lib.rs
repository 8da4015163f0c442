//! Altar scan core: cleans host option text, matches effect lines against a
//! catalog, deduplicates two-sided altars and scores each side.

pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::altar::{AltarComponent, AltarRepository, AltarType, SideComponent};
pub use services::catalog::{EffectDatabase, EffectDefinition, Polarity, TargetCategory};
pub use services::config::{AltarSettings, SettingsStore};
pub use services::matcher::{EffectMatcher, MatchResult};
pub use services::scan::{AltarScanner, ElementId, ElementTree, Rect, ScanStats, Side};
pub use services::scoring::{AltarWeights, ScoringEngine, WeightLookup, WeightTable};
pub use services::text::TextCleaner;
pub use types::{AltarError, AltarResult};
