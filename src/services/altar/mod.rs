//! Two-sided altar model: sides, components, identity keys and the repository.

pub mod classifier;
pub mod component;
pub mod repository;
pub mod side;

pub use classifier::{AltarPathFragments, AltarType};
pub use component::{identity_key, AltarComponent, IDENTITY_SEPARATOR};
pub use repository::{AltarRepository, InsertOutcome};
pub use side::{SideComponent, LEADING_SLOTS, MAX_EFFECTS_PER_POLARITY};
