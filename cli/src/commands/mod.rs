//! Subcommand implementations

pub mod decide;
pub mod generate;
pub mod vote;
