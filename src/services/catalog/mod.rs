//! Effect catalog: the fixed set of upsides and downsides an altar can roll.

pub mod database;
pub mod models;

pub use database::EffectDatabase;
pub use models::{EffectDefinition, Polarity, TargetCategory};
