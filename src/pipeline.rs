//! Fetch pipeline
//!
//! The whole program is one linear, fallible pipeline: load the credential,
//! configure a session, fetch one value, write one line. Each stage returns
//! `Result` so the caller decides how to report failure; a stage failure
//! stops the pipeline before the next stage runs.

use crate::error::Result;
use crate::qrng::RandomSource;
use crate::token::Token;
use std::io::Write;

/// Fetch exactly one signed 32-bit integer from the source
pub fn fetch_one(source: &dyn RandomSource) -> Result<i32> {
    source.random_int32()
}

/// Fetch one integer and write its decimal representation plus a newline
///
/// Nothing is written when the fetch fails.
pub fn run(source: &dyn RandomSource, out: &mut dyn Write) -> Result<()> {
    let value = fetch_one(source)?;
    writeln!(out, "{}", value)?;
    Ok(())
}

/// Run the full pipeline with injectable stages
///
/// `load_token` runs first; the source is only built (and the network only
/// touched) once the credential is in hand.
pub fn run_stages<L, B>(load_token: L, build_source: B, out: &mut dyn Write) -> Result<()>
where
    L: FnOnce() -> Result<Token>,
    B: FnOnce(Token) -> Result<Box<dyn RandomSource>>,
{
    let token = load_token()?;
    let source = build_source(token)?;
    run(source.as_ref(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        value: i32,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(value: i32) -> Self {
            Self {
                value,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RandomSource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn description(&self) -> &'static str {
            "fixed-value stub"
        }

        fn bytes(&self, n: usize) -> Result<Vec<u8>> {
            assert_eq!(n, 4);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value.to_be_bytes().to_vec())
        }
    }

    struct FailingSource;

    impl RandomSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn description(&self) -> &'static str {
            "always fails"
        }

        fn bytes(&self, _n: usize) -> Result<Vec<u8>> {
            Err(Error::Source("service unavailable".to_string()))
        }
    }

    #[test]
    fn test_output_is_value_and_newline() {
        let source = StubSource::new(42);
        let mut out = Vec::new();

        run(&source, &mut out).unwrap();

        assert_eq!(out, b"42\n");
    }

    #[test]
    fn test_negative_value_output() {
        let source = StubSource::new(-7);
        let mut out = Vec::new();

        run(&source, &mut out).unwrap();

        assert_eq!(out, b"-7\n");
    }

    #[test]
    fn test_failure_writes_nothing() {
        let mut out = Vec::new();

        let result = run(&FailingSource, &mut out);

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_exactly_one_fetch_per_run() {
        let source = StubSource::new(7);
        let mut out = Vec::new();

        run(&source, &mut out).unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_token_stops_before_source_build() {
        let mut out = Vec::new();
        let mut built = false;

        let result = run_stages(
            || Err(Error::TokenNotFound("/nonexistent/.ibmq-token".to_string())),
            |_token| {
                built = true;
                Ok(Box::new(StubSource::new(1)) as Box<dyn RandomSource>)
            },
            &mut out,
        );

        assert!(matches!(result, Err(Error::TokenNotFound(_))));
        assert!(!built);
        assert!(out.is_empty());
    }

    #[test]
    fn test_token_passed_through_verbatim() {
        let mut out = Vec::new();
        let mut seen = String::new();

        run_stages(
            || Ok(Token::new("TOKEN123\n")),
            |token| {
                seen = token.as_str().to_string();
                Ok(Box::new(StubSource::new(5)) as Box<dyn RandomSource>)
            },
            &mut out,
        )
        .unwrap();

        assert_eq!(seen, "TOKEN123\n");
        assert_eq!(out, b"5\n");
    }
}
