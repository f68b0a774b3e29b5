//! devagent - command-line view of the Qwen3-DevAgent model catalog
//!
//! Thin binary entry point that delegates to the CLI handlers.

use anyhow::{Context, Result};
use clap::Parser;
use devagent_catalog::{ConfigManager, DevagentConfig};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let args = Cli::parse();

    let config = match ConfigManager::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) if !args.command.needs_config() => {
            initialize_tracing(&args, &DevagentConfig::default());
            tracing::warn!(%error, "ignoring unusable configuration");
            ConfigManager::default()
        }
        Err(error) => return Err(error).context("failed to load devagent configuration"),
    };
    initialize_tracing(&args, config.config());
    if let Some(path) = config.config_path() {
        tracing::debug!(path = %path.display(), "using configuration file");
    }

    match &args.command {
        Commands::Models { command } => {
            cli::models::handle_models_command(&args, &config, command)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` takes precedence; otherwise the configured level, raised once
/// per `-v`. Logs go to stderr so stdout stays machine-readable.
fn initialize_tracing(args: &Cli, config: &DevagentConfig) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = config.debug.trace_level.raised_by(args.verbose);
        EnvFilter::new(format!("devagent={level},devagent_catalog={level}"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
