//! Backends command handler
//!
//! Lists the provider's backends with status and queue depth, so a usable
//! device can be picked when the default is offline.

use crate::config::Config;
use crate::error::Result;
use crate::provider::{off_runtime, BackendStatus, Session};
use crate::token::Token;
use clap::Args;
use std::path::PathBuf;

/// Backends command arguments
#[derive(Args)]
pub struct BackendsArgs {
    /// Token file path (default: ~/.ibmq-token)
    #[arg(long)]
    pub token_file: Option<PathBuf>,

    /// Only show backends that are online
    #[arg(long)]
    pub online: bool,
}

/// Run the backends command
pub async fn run(args: BackendsArgs) -> Result<()> {
    let config = Config::load()?;

    let token_path = match &args.token_file {
        Some(path) => path.clone(),
        None => config.token_path()?,
    };
    let token = Token::load_from(&token_path)?;

    let mut backends = off_runtime(move || {
        let session = Session::new(token)?;
        session.list_backends()
    })?;

    if args.online {
        backends.retain(|b| b.status == BackendStatus::Online);
    }

    backends.sort_by_key(|b| b.pending_jobs);

    println!(
        "{:<28} {:>6} {:>8} {:>8}  {}",
        "NAME", "QUBITS", "STATUS", "PENDING", "KIND"
    );
    for backend in &backends {
        println!(
            "{:<28} {:>6} {:>8} {:>8}  {}",
            backend.name,
            backend.n_qubits,
            format!("{:?}", backend.status).to_lowercase(),
            backend.pending_jobs,
            if backend.simulator { "simulator" } else { "device" }
        );
    }

    Ok(())
}
