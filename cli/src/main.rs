//! CLI entrypoint for consenso
//!
//! Wires the layers together: configuration and participant files from the
//! infrastructure crate, routing from the application crate, solvers from
//! the domain crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match &cli.command {
        Command::Generate(args) => commands::generate::run(args),
        Command::Decide(args) => commands::decide::run(args).await,
        Command::Vote(args) => commands::vote::run(args),
    }
}
