//! CLI entrypoint for pitchpoll
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use pitchpoll_application::{PollController, VoteStore};
use pitchpoll_domain::SessionLimits;
use pitchpoll_infrastructure::{
    ConfigLoader, JsonlVoteStore, MemoryVoteStore, SystemClock, TokenIdentityResolver,
};
use pitchpoll_presentation::{Cli, OperatorRepl};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let limits = config
        .session_limits()
        .context("Invalid session limits in configuration")?;

    info!("Starting pitchpoll");

    // === Dependency Injection ===
    let identity = Arc::new(TokenIdentityResolver::new());
    let store_path = cli
        .store
        .clone()
        .or_else(|| config.store.path.as_deref().map(PathBuf::from));

    match store_path {
        Some(path) => {
            let store = Arc::new(
                JsonlVoteStore::open(&path)
                    .with_context(|| format!("Failed to open ballot log at {}", path.display()))?,
            );
            info!(path = %path.display(), "Votes persisted to ballot log");
            run_console(store, identity, limits, &cli).await
        }
        None => {
            info!("Votes kept in memory (no store path configured)");
            run_console(Arc::new(MemoryVoteStore::new()), identity, limits, &cli).await
        }
    }
}

async fn run_console<S: VoteStore + 'static>(
    store: Arc<S>,
    identity: Arc<TokenIdentityResolver>,
    limits: SessionLimits,
    cli: &Cli,
) -> Result<()> {
    let controller = Arc::new(PollController::new(store, identity, SystemClock, limits));
    let repl = OperatorRepl::new(controller).with_banner(!cli.quiet);
    repl.run().await?;
    Ok(())
}
