use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_selftest-demo"))
        .args(args)
        .env("LOG", "off")
        .output()
        .expect("failed to spawn demo binary")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn hard_failure_halts_the_process() {
    let output = demo(&[]);

    assert_eq!(
        stdout_lines(&output),
        vec![
            "MainTests::JustWork PASSED",
            "MainTests::JustWork2 PASSED",
            "MainTests::ThrowException THREW EXCEPTION",
            "MainTests::JustNotWork1 EXCEPT",
            "MainTests::JustNotWork2 ASSERT",
        ]
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn runs_are_deterministic() {
    let first = demo(&[]);
    let second = demo(&[]);
    assert_eq!(stdout_lines(&first), stdout_lines(&second));
}

#[test]
fn list_shows_every_registered_test() {
    let output = demo(&["--list"]);

    assert_eq!(
        stdout_lines(&output),
        vec![
            "MainTests::JustWork",
            "MainTests::JustWork2",
            "MainTests::ThrowException",
            "MainTests::JustNotWork1",
            "MainTests::JustNotWork2",
            "AfterHalt::NeverRuns",
        ]
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn rejects_unknown_flags_with_usage_code() {
    let output = demo(&["--bogus"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
}

#[test]
fn rejects_bad_log_level_with_usage_code() {
    let output = Command::new(env!("CARGO_BIN_EXE_selftest-demo"))
        .env("LOG", "loud")
        .output()
        .expect("failed to spawn demo binary");
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
}
