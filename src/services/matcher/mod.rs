//! Effect matching: resolves cleaned effect lines to canonical catalog ids.

pub mod effect_matcher;
pub mod target;

pub use effect_matcher::{EffectMatcher, MatchResult, Suggestion};
pub use target::TargetKeywords;
