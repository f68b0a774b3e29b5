use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Inspect the Qwen3-DevAgent model catalog.
#[derive(Debug, Parser)]
#[command(name = "devagent", version, about, long_about = None)]
pub struct Cli {
    /// Catalog document to read instead of the configured or bundled one
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Configuration file (defaults to ./devagent.toml, then ~/.qwen3-devagent/devagent.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable ANSI colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse and validate catalog entries
    Models {
        #[command(subcommand)]
        command: ModelCommands,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ModelCommands {
    /// List entries grouped by category
    List {
        /// Print the compact JSON document instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one entry
    Info {
        /// Model id, e.g. `qwen3`
        id: String,
    },
    /// Print the catalog document, re-serialized
    Dump,
    /// Validate a catalog document
    Check {
        /// Document to validate (defaults to the resolved catalog)
        path: Option<PathBuf>,
    },
    /// Print the JSON Schema of the catalog document
    Schema,
}

impl Commands {
    /// Whether the command resolves the catalog through the configuration.
    pub fn needs_config(&self) -> bool {
        match self {
            Commands::Models { command } => command.needs_config(),
        }
    }
}

impl ModelCommands {
    pub fn needs_config(&self) -> bool {
        match self {
            ModelCommands::List { .. } | ModelCommands::Info { .. } | ModelCommands::Dump => true,
            ModelCommands::Check { path } => path.is_none(),
            ModelCommands::Schema => false,
        }
    }
}
