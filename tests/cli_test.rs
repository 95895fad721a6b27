//! Process-level CLI tests
//!
//! Runs the compiled binary to check exit status and stdout framing, which
//! in-crate unit tests cannot observe. HOME and XDG_CONFIG_HOME point at a
//! temp dir so no real credential or config is touched; the failure cases
//! all stop before any network call.

use std::process::{Command, Output};
use tempfile::TempDir;

fn run_in(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_q-rand"))
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn pseudo_fetch_prints_one_integer_line_and_exits_zero() {
    let home = TempDir::new().unwrap();

    let output = run_in(&home, &["fetch", "--source", "pseudo"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with('\n'));
    let line = stdout.trim_end_matches('\n');
    assert!(!line.contains('\n'), "stdout must be exactly one line");
    line.parse::<i32>().unwrap();
}

#[test]
fn missing_token_file_exits_nonzero_with_empty_stdout() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("no-such-token");

    let output = run_in(
        &home,
        &[
            "fetch",
            "--source",
            "ibmq",
            "--token-file",
            missing.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no integer line on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Token file not found"));
}

#[test]
fn bare_invocation_without_token_exits_nonzero() {
    // The default command is an ibmq fetch; with no ~/.ibmq-token in the
    // temp home it must fail at the credential stage.
    let home = TempDir::new().unwrap();

    let output = run_in(&home, &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_source_exits_nonzero() {
    let home = TempDir::new().unwrap();

    let output = run_in(&home, &["fetch", "--source", "dice"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown source"));
}
