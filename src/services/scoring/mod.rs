//! Weight scoring for altar sides.

pub mod engine;
pub mod weights;

pub use engine::{score, score_side, AltarWeights, ScoringEngine, SideWeights, DOWNSIDE_FLOOR};
pub use weights::{WeightLookup, WeightTable, DEFAULT_WEIGHT};
