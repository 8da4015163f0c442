pub mod errors;

pub use errors::{AltarError, AltarResult};
