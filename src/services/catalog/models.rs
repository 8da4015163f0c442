//! Domain types for the effect catalog.
//!
//! Contains: TargetCategory, Polarity, EffectDefinition.

use serde::{Deserialize, Serialize};

/// Who an altar side's effects apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetCategory {
    Player,
    Boss,
    Minion,
}

impl TargetCategory {
    pub const ALL: [TargetCategory; 3] = [Self::Player, Self::Boss, Self::Minion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Boss => "Boss",
            Self::Minion => "Minion",
        }
    }

    /// Prefix carried by every canonical id of this category (`"Boss|"`).
    pub fn canonical_prefix(&self) -> String {
        format!("{}|", self.as_str())
    }
}

impl std::fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which catalog list an effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Upside,
    Downside,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Upside => write!(f, "upside"),
            Polarity::Downside => write!(f, "downside"),
        }
    }
}

/// One known altar effect.
///
/// `id` is the in-game wording with `#` standing in for rolled values
/// (e.g. "Final Boss drops # additional Divine Orbs").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectDefinition {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub target_category: TargetCategory,
    #[serde(default = "default_weight")]
    pub default_weight: i32,
}

fn default_weight() -> i32 {
    1
}

impl EffectDefinition {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        target_category: TargetCategory,
        default_weight: i32,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            target_category,
            default_weight,
        }
    }

    /// `"{category}|{id}"`, the key used by weight tables and identity keys.
    pub fn canonical_id(&self) -> String {
        format!("{}|{}", self.target_category, self.id)
    }

    /// Display name, falling back to the raw id when the catalog omits one.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}
