//! Subcommand implementations.

pub mod fixtures;
pub mod generate;
pub mod list;
