use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An effect line that matched nothing, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedEffect {
    pub descriptor: String,
    pub text: String,
    /// Closest catalog id, if any is similar enough.
    pub suggestion: Option<String>,
}

/// Counters for one scan cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub cycle: u64,
    pub elements_found: usize,
    pub components_added: usize,
    pub components_duplicated: usize,
    pub components_failed: usize,
    pub components_removed: usize,
    pub effects_matched: usize,
    pub effects_unmatched: usize,
    /// Most recent unmatched effects across cycles, oldest first.
    pub recent_unmatched: Vec<UnmatchedEffect>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ScanStats {
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            ..Default::default()
        }
    }

    /// Append to the rolling unmatched list. A repeated entry moves to the end
    /// instead of appearing twice.
    pub fn push_unmatched(&mut self, effect: UnmatchedEffect, limit: usize) {
        self.recent_unmatched
            .retain(|e| !(e.descriptor == effect.descriptor && e.text == effect.text));
        self.recent_unmatched.push(effect);
        if self.recent_unmatched.len() > limit {
            let excess = self.recent_unmatched.len() - limit;
            self.recent_unmatched.drain(..excess);
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
