//! Fetch command handler
//!
//! Loads the credential, configures a provider session, fetches one random
//! 32-bit integer, and prints it.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pipeline;
use crate::provider::JobOptions;
use crate::qrng::{available_sources, get_source};
use crate::token::Token;
use clap::Args;
use std::path::PathBuf;

/// Fetch command arguments
#[derive(Args, Default)]
pub struct FetchArgs {
    /// IBM Quantum backend to run on
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Randomness source
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Token file path (default: ~/.ibmq-token)
    #[arg(long)]
    pub token_file: Option<PathBuf>,

    /// Shots per measurement job
    #[arg(long)]
    pub shots: Option<u32>,

    /// List available sources
    #[arg(short = 'S', long = "list-sources")]
    pub list_sources: bool,
}

/// Resolved parameters for one fetch: CLI flags override config defaults
#[derive(Debug)]
struct FetchPlan {
    source: String,
    backend: String,
    token_path: PathBuf,
    options: JobOptions,
}

/// Merge CLI flags and config defaults into a plan
///
/// The source name is validated here so a bad name fails before the
/// credential is read.
fn plan(args: &FetchArgs, config: &Config) -> Result<FetchPlan> {
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| config.defaults.source.clone());

    if !available_sources().iter().any(|s| s.name == source) {
        return Err(Error::Config(format!("Unknown source: {}", source)));
    }

    let backend = args
        .backend
        .clone()
        .unwrap_or_else(|| config.defaults.backend.clone());

    let token_path = match &args.token_file {
        Some(path) => path.clone(),
        None => config.token_path()?,
    };

    let mut options = JobOptions::from(&config.job);
    if let Some(shots) = args.shots {
        options.shots = shots;
    }

    Ok(FetchPlan {
        source,
        backend,
        token_path,
        options,
    })
}

/// Run the fetch command
pub async fn run(args: FetchArgs) -> Result<()> {
    if args.list_sources {
        list_sources();
        return Ok(());
    }

    let config = Config::load()?;
    let plan = plan(&args, &config)?;

    let mut stdout = std::io::stdout();

    if plan.source == "pseudo" {
        // Local source, no credential involved
        let source = get_source(&plan.source, None, &plan.backend, plan.options)?;
        return pipeline::run(source.as_ref(), &mut stdout);
    }

    pipeline::run_stages(
        || Token::load_from(&plan.token_path),
        |token| get_source(&plan.source, Some(token), &plan.backend, plan.options),
        &mut stdout,
    )
}

/// Print available sources
fn list_sources() {
    println!("Available sources:");
    for source in available_sources() {
        println!("  {:6} - {}", source.name, source.description);
    }
}
