//! q-rand: Quantum Random Integer Fetcher
//!
//! A library and CLI tool for fetching random integers from IBM Quantum
//! backends. One invocation reads the API token from `~/.ibmq-token`, opens
//! a provider session, selects a backend (falling back to the QASM simulator
//! when the requested device is unavailable), and prints one random signed
//! 32-bit integer.
//!
//! ## Quick Start
//!
//! ```rust
//! use q_rand::pipeline;
//! use q_rand::qrng::pseudo::PseudoSource;
//!
//! let source = PseudoSource::new();
//! let mut out = Vec::new();
//! pipeline::run(&source, &mut out).unwrap();
//! // out now holds one decimal integer and a newline
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod qrng;
pub mod token;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use provider::{BackendInfo, BackendStatus, JobOptions, Session};
pub use qrng::RandomSource;
pub use token::Token;
