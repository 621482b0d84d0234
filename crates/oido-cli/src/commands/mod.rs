//! CLI subcommands.

pub mod bands;
pub mod curve;
pub mod render;
pub mod sweep;
