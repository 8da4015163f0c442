//! Scan pipeline: host element tree in, deduplicated scored altars out.

pub mod builder;
pub mod cycle;
pub mod element;
pub mod types;

pub use builder::ComponentBuilder;
pub use cycle::AltarScanner;
pub use element::{ElementId, ElementTree, Rect, Side};
pub use types::{ScanStats, UnmatchedEffect};
