use serde::Serialize;
use thiserror::Error;

use crate::services::catalog::{Polarity, TargetCategory};
use crate::services::scan::element::{ElementId, Side};

#[derive(Debug, Error)]
pub enum AltarError {
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("Duplicate {polarity} effect '{id}' for target {category}")]
    DuplicateEffect {
        polarity: Polarity,
        category: TargetCategory,
        id: String,
    },
    #[error("Effect '{id}' has default weight {weight}, expected 1..=100")]
    WeightOutOfRange { id: String, weight: i32 },
    #[error("Altar element {container} has no {side} side element")]
    MissingSideElement { container: ElementId, side: Side },
    #[error("Settings error: {0}")]
    Settings(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Serialize for AltarError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type AltarResult<T> = Result<T, AltarError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
