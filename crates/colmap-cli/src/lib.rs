//! CLI library components for colmap.

pub mod input;
pub mod logging;
