//! Altar type from the originating element's path.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltarType {
    SearingExarch,
    EaterOfWorlds,
    Unknown,
}

impl std::fmt::Display for AltarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AltarType::SearingExarch => write!(f, "SearingExarch"),
            AltarType::EaterOfWorlds => write!(f, "EaterOfWorlds"),
            AltarType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Path fragments identifying each altar type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltarPathFragments {
    pub searing_exarch: String,
    pub eater_of_worlds: String,
}

impl Default for AltarPathFragments {
    fn default() -> Self {
        Self {
            searing_exarch: "CleansingFireAltar".into(),
            eater_of_worlds: "TangleAltar".into(),
        }
    }
}

impl AltarPathFragments {
    pub fn classify(&self, path: &str) -> AltarType {
        if !self.searing_exarch.is_empty() && path.contains(&self.searing_exarch) {
            AltarType::SearingExarch
        } else if !self.eater_of_worlds.is_empty() && path.contains(&self.eater_of_worlds) {
            AltarType::EaterOfWorlds
        } else {
            AltarType::Unknown
        }
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
