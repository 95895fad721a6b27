//! Pseudo-random source for testing
//!
//! Uses the `rand` crate. This is NOT quantum random, but provides a fast,
//! network-free source for development and testing.

use crate::error::Result;
use crate::qrng::RandomSource;
use rand::RngCore;
use std::sync::Mutex;

/// Pseudo-random number source
pub struct PseudoSource;

impl PseudoSource {
    /// Create a new pseudo-random source
    pub fn new() -> Self {
        Self
    }
}

impl Default for PseudoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for PseudoSource {
    fn name(&self) -> &'static str {
        "pseudo"
    }

    fn description(&self) -> &'static str {
        "Pseudo-random number generator (for testing)"
    }

    fn bytes(&self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(bytes)
    }
}

/// Seeded pseudo-random source for deterministic testing
///
/// The same seed produces the same byte sequence.
pub struct SeededPseudoSource {
    rng: Mutex<rand::rngs::StdRng>,
}

impl SeededPseudoSource {
    /// Create a new seeded pseudo-random source
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededPseudoSource {
    fn name(&self) -> &'static str {
        "pseudo-seeded"
    }

    fn description(&self) -> &'static str {
        "Seeded pseudo-random number generator (for reproducible testing)"
    }

    fn bytes(&self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        let mut rng = self.rng.lock().unwrap();
        rng.fill_bytes(&mut bytes);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_source_bytes() {
        let source = PseudoSource::new();
        let bytes = source.bytes(100).unwrap();
        assert_eq!(bytes.len(), 100);
    }

    #[test]
    fn test_pseudo_source_int32() {
        let source = PseudoSource::new();
        // Just verify it produces a value without error
        source.random_int32().unwrap();
    }

    #[test]
    fn test_seeded_source_reproducible() {
        let source1 = SeededPseudoSource::new(42);
        let source2 = SeededPseudoSource::new(42);

        let bytes1 = source1.bytes(100).unwrap();
        let bytes2 = source2.bytes(100).unwrap();

        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_seeded_source_int32_reproducible() {
        let source1 = SeededPseudoSource::new(7);
        let source2 = SeededPseudoSource::new(7);

        assert_eq!(
            source1.random_int32().unwrap(),
            source2.random_int32().unwrap()
        );
    }
}
