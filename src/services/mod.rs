pub mod altar;
pub mod catalog;
pub mod config;
pub mod core;
pub mod matcher;
pub mod scan;
pub mod scoring;
pub mod text;
