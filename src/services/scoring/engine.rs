//! Side weighting: upside sum over (1 + downside sum), rounded to 2 places.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::altar::{AltarComponent, SideComponent, LEADING_SLOTS};
use crate::services::scan::element::Side;
use crate::services::scoring::weights::WeightLookup;

/// Floor added to every downside sum so the ratio is always defined.
pub const DOWNSIDE_FLOOR: i32 = 1;

// ─── Result Types ────────────────────────────────────────────────────────────

/// Score of one side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideWeights {
    pub upside_sum: i32,
    /// Always `>= 1`.
    pub downside_sum: i32,
    pub ratio: f64,
    /// Weights of upside slots 1–4; empty slots weigh 0.
    pub upside_weights: [i32; LEADING_SLOTS],
    pub downside_weights: [i32; LEADING_SLOTS],
}

impl SideWeights {
    /// Score of a missing side: `0 / 1 / 0`.
    pub fn empty() -> Self {
        Self {
            upside_sum: 0,
            downside_sum: DOWNSIDE_FLOOR,
            ratio: 0.0,
            upside_weights: [0; LEADING_SLOTS],
            downside_weights: [0; LEADING_SLOTS],
        }
    }
}

impl Default for SideWeights {
    fn default() -> Self {
        Self::empty()
    }
}

/// Scores for both sides of one altar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltarWeights {
    pub top_upside_sum: i32,
    pub top_downside_sum: i32,
    pub bottom_upside_sum: i32,
    pub bottom_downside_sum: i32,
    pub top_ratio: f64,
    pub bottom_ratio: f64,
    pub top_upside_weights: [i32; LEADING_SLOTS],
    pub top_downside_weights: [i32; LEADING_SLOTS],
    pub bottom_upside_weights: [i32; LEADING_SLOTS],
    pub bottom_downside_weights: [i32; LEADING_SLOTS],
}

impl AltarWeights {
    pub fn from_sides(top: SideWeights, bottom: SideWeights) -> Self {
        Self {
            top_upside_sum: top.upside_sum,
            top_downside_sum: top.downside_sum,
            bottom_upside_sum: bottom.upside_sum,
            bottom_downside_sum: bottom.downside_sum,
            top_ratio: top.ratio,
            bottom_ratio: bottom.ratio,
            top_upside_weights: top.upside_weights,
            top_downside_weights: top.downside_weights,
            bottom_upside_weights: bottom.upside_weights,
            bottom_downside_weights: bottom.downside_weights,
        }
    }

    pub fn side(&self, side: Side) -> SideWeights {
        match side {
            Side::Top => SideWeights {
                upside_sum: self.top_upside_sum,
                downside_sum: self.top_downside_sum,
                ratio: self.top_ratio,
                upside_weights: self.top_upside_weights,
                downside_weights: self.top_downside_weights,
            },
            Side::Bottom => SideWeights {
                upside_sum: self.bottom_upside_sum,
                downside_sum: self.bottom_downside_sum,
                ratio: self.bottom_ratio,
                upside_weights: self.bottom_upside_weights,
                downside_weights: self.bottom_downside_weights,
            },
        }
    }
}

// ─── Scoring ─────────────────────────────────────────────────────────────────

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Downside weight of one id. Negative overrides count as zero so the sum
/// never drops below the floor. Upsides use the raw weight.
fn downside_weight(weights: &dyn WeightLookup, canonical_id: &str) -> i32 {
    weights.weight(canonical_id).max(0)
}

fn leading_weights(
    ids: &[String],
    weight_of: impl Fn(&str) -> i32,
) -> [i32; LEADING_SLOTS] {
    std::array::from_fn(|i| ids.get(i).map(|id| weight_of(id)).unwrap_or(0))
}

/// Score one side; `None` scores as [`SideWeights::empty`].
pub fn score_side(side: Option<&SideComponent>, weights: &dyn WeightLookup) -> SideWeights {
    let Some(side) = side else {
        return SideWeights::empty();
    };

    let upside_sum: i32 = side
        .upsides()
        .iter()
        .map(|id| weights.weight(id))
        .fold(0i32, i32::saturating_add);
    let downside_sum: i32 = side
        .downsides()
        .iter()
        .map(|id| downside_weight(weights, id))
        .fold(DOWNSIDE_FLOOR, i32::saturating_add);

    SideWeights {
        upside_sum,
        downside_sum,
        ratio: round2(f64::from(upside_sum) / f64::from(downside_sum)),
        upside_weights: leading_weights(side.upsides(), |id| weights.weight(id)),
        downside_weights: leading_weights(side.downsides(), |id| downside_weight(weights, id)),
    }
}

/// Score both sides of an altar; a missing altar scores `0 / 1 / 0` per side.
pub fn score(component: Option<&AltarComponent>, weights: &dyn WeightLookup) -> AltarWeights {
    AltarWeights::from_sides(
        score_side(component.map(AltarComponent::top), weights),
        score_side(component.map(AltarComponent::bottom), weights),
    )
}

/// Scores altars against a shared weight source, caching per side for the
/// duration of one scan cycle.
pub struct ScoringEngine {
    weights: Arc<dyn WeightLookup>,
}

impl ScoringEngine {
    pub fn new(weights: Arc<dyn WeightLookup>) -> Self {
        Self { weights }
    }

    /// Uncached score.
    pub fn score(&self, component: &AltarComponent) -> AltarWeights {
        score(Some(component), self.weights.as_ref())
    }

    /// Score, reusing side weights already computed during `cycle`.
    pub fn score_for_cycle(&self, component: &AltarComponent, cycle: u64) -> AltarWeights {
        AltarWeights::from_sides(
            self.side_for_cycle(component.top(), cycle),
            self.side_for_cycle(component.bottom(), cycle),
        )
    }

    fn side_for_cycle(&self, side: &SideComponent, cycle: u64) -> SideWeights {
        if let Some(cached) = side.cached_weights(cycle) {
            return cached;
        }
        let computed = score_side(Some(side), self.weights.as_ref());
        side.store_weights(cycle, computed);
        computed
    }

    /// Weight of upside slot `n` (1-based); 0 for an empty slot.
    pub fn upside_slot_weight(&self, side: &SideComponent, n: usize) -> i32 {
        match side.upside(n) {
            "" => 0,
            id => self.weights.weight(id),
        }
    }

    /// Weight of downside slot `n` (1-based); 0 for an empty slot.
    pub fn downside_slot_weight(&self, side: &SideComponent, n: usize) -> i32 {
        match side.downside(n) {
            "" => 0,
            id => downside_weight(self.weights.as_ref(), id),
        }
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
