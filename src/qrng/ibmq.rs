//! IBM Quantum measurement-based randomness source
//!
//! Extracts uniform bits from measurement outcomes on the session's selected
//! backend. Each shot of the measurement circuit yields one bitstring of
//! fresh random bits; leftovers are buffered so a single job can service
//! many requests.
//!
//! All provider calls run through [`off_runtime`] to keep the blocking HTTP
//! client off the async runtime.

use crate::error::{Error, Result};
use crate::provider::{off_runtime, JobOptions, Session};
use crate::qrng::RandomSource;
use crate::token::Token;
use std::collections::VecDeque;
use std::sync::Mutex;

/// IBM Quantum randomness source
pub struct IbmqSource {
    session: Session,
    bits: Mutex<VecDeque<bool>>,
}

impl IbmqSource {
    /// Open a session and select a backend
    ///
    /// The credential is registered first and the backend selected second;
    /// an unavailable backend downgrades to the simulator inside the
    /// session (see [`Session::select_backend`]).
    pub fn connect(token: Token, backend: &str, options: JobOptions) -> Result<Self> {
        let session = off_runtime(move || {
            let mut session = Session::with_options(token, options)?;
            session.select_backend(backend)?;
            Ok(session)
        })?;

        Ok(Self {
            session,
            bits: Mutex::new(VecDeque::new()),
        })
    }

    /// Wrap an already-configured session
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            bits: Mutex::new(VecDeque::new()),
        }
    }

    /// Refill the bit buffer until it holds at least `min_bits`
    fn refill(&self, bits: &mut VecDeque<bool>, min_bits: usize) -> Result<()> {
        let backend = self
            .session
            .selected_backend()
            .ok_or(Error::NoBackendSelected)?;
        let bits_per_shot = backend.n_qubits.max(1);
        let max_shots = self.session.options().shots.max(1);

        while bits.len() < min_bits {
            let missing = min_bits - bits.len();
            let shots = missing
                .div_ceil(bits_per_shot)
                .min(max_shots as usize)
                .max(1) as u32;

            let memory = off_runtime(|| self.session.run_measurement(shots))?;

            let before = bits.len();
            for shot in &memory {
                for c in shot.chars() {
                    match c {
                        '0' => bits.push_back(false),
                        '1' => bits.push_back(true),
                        // Registers may be space-separated in memory strings
                        _ => {}
                    }
                }
            }

            if bits.len() == before {
                return Err(Error::Source(
                    "measurement job produced no usable bits".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl RandomSource for IbmqSource {
    fn name(&self) -> &'static str {
        "ibmq"
    }

    fn description(&self) -> &'static str {
        "IBM Quantum measurement-based random number source"
    }

    fn bytes(&self, n: usize) -> Result<Vec<u8>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut bits = self.bits.lock().unwrap();
        self.refill(&mut bits, n * 8)?;

        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let mut byte = 0u8;
            for _ in 0..8 {
                // refill guarantees enough buffered bits
                let bit = bits.pop_front().unwrap();
                byte = (byte << 1) | bit as u8;
            }
            out.push(byte);
        }

        Ok(out)
    }
}
