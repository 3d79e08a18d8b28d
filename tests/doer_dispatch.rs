// tests/doer_dispatch.rs
#![cfg(unix)]

mod common;
use crate::common::{collect_chunks, init_tracing, with_timeout};

use std::error::Error;

use tokio::sync::mpsc;

use watchdo::errors::WatchdoError;
use watchdo::exec::{parse_command, DoerManager};
use watchdo::exec::shell::failure_message;
use watchdo::types::DoerKind;

type TestResult = Result<(), Box<dyn Error>>;

async fn run(commands: &[&str], file_name: &str) -> Result<(Vec<String>, Vec<i32>), WatchdoError> {
    let doers = DoerManager::new(commands.iter().copied(), DoerKind::Shell)?;
    let (tx, rx) = mpsc::unbounded_channel();

    let outcomes = doers.run_doers(file_name, tx).await?;
    let chunks = collect_chunks(rx).await;

    Ok((chunks, outcomes.iter().map(|o| o.exit_code).collect()))
}

#[tokio::test]
async fn every_doer_runs_even_after_a_failure() -> TestResult {
    init_tracing();

    let (chunks, codes) = with_timeout(run(
        &["echo Hello", "false", "echo Third"],
        "any.txt",
    ))
    .await?;

    assert_eq!(
        chunks,
        vec![
            "Hello\n".to_string(),
            "\nCommand failed to run, exited with error code 1\n".to_string(),
            "Third\n".to_string(),
        ]
    );
    assert_eq!(codes, vec![0, 1, 0]);
    Ok(())
}

#[tokio::test]
async fn exit_code_is_reported_verbatim() -> TestResult {
    let (chunks, codes) = with_timeout(run(&["exit 3"], "x")).await?;

    assert_eq!(chunks, vec![failure_message(3)]);
    assert_eq!(codes, vec![3]);
    Ok(())
}

#[tokio::test]
async fn file_name_is_interpolated_into_the_command() -> TestResult {
    let (chunks, _) = with_timeout(run(
        &["echo changed %f", r"echo \%f"],
        "src/main.rs",
    ))
    .await?;

    assert_eq!(chunks, vec!["changed src/main.rs\n", "%f\n"]);
    Ok(())
}

#[tokio::test]
async fn stderr_is_captured_too() -> TestResult {
    let (chunks, codes) = with_timeout(run(&["echo oops 1>&2"], "x")).await?;

    assert_eq!(chunks, vec!["oops\n"]);
    assert_eq!(codes, vec![0]);
    Ok(())
}

#[tokio::test]
async fn multi_line_output_arrives_line_by_line() -> TestResult {
    let (chunks, _) = with_timeout(run(&["printf 'one\\ntwo\\nthree'"], "x")).await?;

    assert_eq!(chunks, vec!["one\n", "two\n", "three"]);
    Ok(())
}

#[test]
fn unknown_doer_prefix_is_rejected() {
    let err = DoerManager::new(["echo fine", "bogus::true"], DoerKind::Shell).unwrap_err();

    match err {
        WatchdoError::UnknownDoer(name) => assert_eq!(name, "Bogus"),
        other => panic!("expected UnknownDoer, got {other:?}"),
    }
}

#[test]
fn doer_prefix_is_normalized() -> TestResult {
    for raw in ["shell::make", "SHELL::make", " shell ::make", "Shell::make"] {
        let (kind, command) = parse_command(raw, DoerKind::Shell)?;
        assert_eq!(kind, DoerKind::Shell, "{raw}");
        assert_eq!(command, "make", "{raw}");
    }
    Ok(())
}

#[test]
fn only_the_first_separator_splits() -> TestResult {
    let (kind, command) = parse_command("shell::echo a::b", DoerKind::Shell)?;
    assert_eq!(kind, DoerKind::Shell);
    assert_eq!(command, "echo a::b");

    let (kind, command) = parse_command("cargo test", DoerKind::Shell)?;
    assert_eq!(kind, DoerKind::Shell);
    assert_eq!(command, "cargo test");
    Ok(())
}

#[test]
fn manager_keeps_declaration_order() -> TestResult {
    let doers = DoerManager::new(["b", "shell::a", "c"], DoerKind::Shell)?;

    let commands: Vec<&str> = doers.doers().iter().map(|d| d.command()).collect();
    assert_eq!(commands, vec!["b", "a", "c"]);
    assert_eq!(doers.commands(), ["b", "shell::a", "c"]);
    Ok(())
}
