//! snipgen: inference API snippet generator.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use snipgen_core::ConfigStore;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("snipgen=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let store = match &cli.config {
        Some(path) => ConfigStore::at(path),
        None => ConfigStore::new(),
    };
    let config = store
        .load()
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", store.path().display()))?;

    match cli.command {
        Commands::Generate(args) => commands::generate::run(&args, config)?,
        Commands::List { json } => commands::list::run(json)?,
        Commands::Fixtures { dir, check, cases } => {
            commands::fixtures::run(&dir, check, &cases, config)?
        }
    }

    Ok(())
}
