//! Altar text cleaning: markup stripping, whitespace removal and line splitting.

pub mod cleaner;
pub mod normalizer;

pub use cleaner::TextCleaner;
pub use normalizer::{clean_text, letters_only, split_descriptor};
