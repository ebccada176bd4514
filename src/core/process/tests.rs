// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ProcessError;

#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert_eq!(output.stdout().trim(), "hello");
}

#[tokio::test]
async fn test_process_exit_code_allowed() {
    let output = ProcessBuilder::raw("exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[tokio::test]
async fn test_process_nonzero_exit_is_error() {
    let err = ProcessBuilder::raw("exit 3")
        .name("failing")
        .run()
        .await
        .unwrap_err();

    let process_err = err.downcast_ref::<ProcessError>().unwrap();
    assert!(matches!(
        process_err,
        ProcessError::NonZeroExit { code: 3, .. }
    ));
}

#[tokio::test]
async fn test_process_success_codes() {
    let output = ProcessBuilder::raw("exit 1")
        .success_codes([0, 1])
        .run()
        .await
        .expect("exit 1 is in the success set");
    assert_eq!(output.exit_code(), 1);
}

#[tokio::test]
async fn test_process_env() {
    let output = ProcessBuilder::raw("echo $CHORES_TEST_VAR")
        .env("CHORES_TEST_VAR", "test_value")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout().trim(), "test_value");
}

#[tokio::test]
async fn test_process_stdin() {
    let output = ProcessBuilder::new("cat")
        .stdin("passphrase\n")
        .capture_stdout()
        .run()
        .await
        .expect("cat should succeed");

    assert_eq!(output.stdout(), "passphrase");
}

#[tokio::test]
async fn test_process_cwd() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("marker.txt"), "").unwrap();

    let output = ProcessBuilder::new("ls")
        .cwd(temp.path())
        .capture_stdout()
        .run()
        .await
        .unwrap();

    assert_eq!(output.stdout(), "marker.txt");
}

#[tokio::test]
async fn test_process_cancelled_before_spawn() {
    let token = CancellationToken::new();
    token.cancel();

    let output = ProcessBuilder::new("sleep")
        .arg("5")
        .run_with_cancellation(token)
        .await
        .unwrap();

    assert!(output.is_interrupted());
}

#[tokio::test]
async fn test_process_cancelled_while_running() {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });

    let output = ProcessBuilder::new("sleep")
        .arg("5")
        .run_with_cancellation(token)
        .await
        .unwrap();

    assert!(output.is_interrupted());
}

#[tokio::test]
async fn test_process_missing_executable() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::ExecutableNotFound { .. })
    ));
}

#[test]
fn test_command_line_quoting() {
    let builder = ProcessBuilder::new("pytest")
        .args(["-k", "lmao and not slow"])
        .arg("-x")
        .arg("it's")
        .arg("");
    assert_eq!(
        builder.command_line(),
        r"pytest -k 'lmao and not slow' -x 'it'\''s' ''"
    );
}

#[test]
fn test_executable_lookup_found() {
    let which_result = ProcessBuilder::which("sh");
    assert!(which_result.is_ok(), "which: sh should be found in PATH");
    assert!(which_result.unwrap().program().exists());

    assert!(ProcessBuilder::exists("sh"));
    let path = ProcessBuilder::find("sh").expect("find: sh should be found");
    assert!(path.exists());
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    let err_msg = ProcessBuilder::which(program).unwrap_err().to_string();
    assert!(
        err_msg.contains(program),
        "which: error should mention the program: {err_msg}"
    );
    assert!(!ProcessBuilder::exists(program));
    assert!(ProcessBuilder::find(program).is_none());
}
