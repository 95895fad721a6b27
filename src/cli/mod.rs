//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions. A bare
//! invocation runs `fetch` with defaults, matching the one-shot use case.

pub mod backends;
pub mod config;
pub mod fetch;

use clap::{Parser, Subcommand};

/// Quantum random integer fetcher
#[derive(Parser)]
#[command(name = "q-rand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one random 32-bit integer (the default)
    Fetch(fetch::FetchArgs),

    /// List the provider's backends
    Backends(backends::BackendsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Fetch(fetch::FetchArgs::default())
    }
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Commands::Fetch(args) => fetch::run(args).await,
        Commands::Backends(args) => backends::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
