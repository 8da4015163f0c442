//! Target descriptor classification.

use serde::{Deserialize, Serialize};

use crate::services::catalog::TargetCategory;
use crate::services::text::normalizer::letters_only;

/// Substrings that identify who a side's effects apply to.
///
/// Checked in priority order boss → minion → player against the letters-only
/// descriptor, so "Map boss" wins over anything else on the same line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetKeywords {
    pub boss: Vec<String>,
    pub minion: Vec<String>,
    pub player: Vec<String>,
}

impl Default for TargetKeywords {
    fn default() -> Self {
        Self {
            boss: vec!["boss".into()],
            minion: vec!["minion".into()],
            player: vec!["player".into()],
        }
    }
}

impl TargetKeywords {
    /// Copy with every keyword reduced to lowercase letters; empty ones dropped.
    pub fn normalized(&self) -> Self {
        let reduce = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| letters_only(w))
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            boss: reduce(&self.boss),
            minion: reduce(&self.minion),
            player: reduce(&self.player),
        }
    }

    /// Classify an already letters-only descriptor. Keywords must be normalized.
    pub fn classify_reduced(&self, reduced: &str) -> Option<TargetCategory> {
        if reduced.is_empty() {
            return None;
        }
        let hit = |words: &[String]| words.iter().any(|w| reduced.contains(w.as_str()));
        if hit(&self.boss) {
            Some(TargetCategory::Boss)
        } else if hit(&self.minion) {
            Some(TargetCategory::Minion)
        } else if hit(&self.player) {
            Some(TargetCategory::Player)
        } else {
            None
        }
    }

    /// Classify a raw or cleaned descriptor line.
    pub fn classify(&self, descriptor: &str) -> Option<TargetCategory> {
        self.normalized()
            .classify_reduced(&letters_only(descriptor))
    }
}

#[cfg(test)]
#[path = "tests/target_tests.rs"]
mod tests;
