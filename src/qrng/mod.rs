//! Randomness sources
//!
//! This module defines the `RandomSource` trait and its implementations.
//! Each source is a single file implementing the trait.

pub mod ibmq;
pub mod pseudo;

use crate::error::{Error, Result};
use crate::provider::JobOptions;
use crate::token::Token;
use serde::{Deserialize, Serialize};

/// Trait for random number sources
///
/// Implementations must be thread-safe (Send + Sync).
pub trait RandomSource: Send + Sync {
    /// Returns the source name (e.g., "ibmq", "pseudo")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this source
    fn description(&self) -> &'static str;

    /// Generate n random bytes
    fn bytes(&self, n: usize) -> Result<Vec<u8>>;

    /// Generate a single signed 32-bit integer
    ///
    /// Default implementation assembles 4 fetched bytes big-endian. The
    /// full i32 range is covered, so negative values are expected.
    fn random_int32(&self) -> Result<i32> {
        let bytes = self.bytes(4)?;
        let word: [u8; 4] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::Source(format!("expected 4 bytes, got {}", bytes.len())))?;
        Ok(i32::from_be_bytes(word))
    }
}

/// Information about a source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source name (used in config/CLI)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Get a source by name
///
/// Sources backed by the provider need a credential; `token` may be `None`
/// for local sources. Unknown names are an error rather than a silent
/// fallback.
pub fn get_source(
    name: &str,
    token: Option<Token>,
    backend: &str,
    options: JobOptions,
) -> Result<Box<dyn RandomSource>> {
    match name {
        "pseudo" => Ok(Box::new(pseudo::PseudoSource::new())),
        "ibmq" => {
            let token = token
                .ok_or_else(|| Error::Config("ibmq source requires a credential".to_string()))?;
            Ok(Box::new(ibmq::IbmqSource::connect(token, backend, options)?))
        }
        other => Err(Error::Config(format!("Unknown source: {}", other))),
    }
}

/// List all available sources with their info
pub fn available_sources() -> Vec<SourceInfo> {
    vec![
        SourceInfo {
            name: "ibmq".to_string(),
            description: "IBM Quantum measurement-based random number source".to_string(),
        },
        SourceInfo {
            name: "pseudo".to_string(),
            description: "Pseudo-random number generator (for testing)".to_string(),
        },
    ]
}
