// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{PytestTool, Suite};
use crate::tools::Tool;
use crate::tools::test_utils::{context, run_with_logs};
use anyhow::Result;

fn line(tool: &PytestTool) -> String {
    tool.command(&context(false)).command_line()
}

#[test]
fn test_pytest_defaults() {
    assert_eq!(
        line(&PytestTool::new()),
        "pytest --verbose --color=yes --capture=sys"
    );
}

#[test]
fn test_pytest_all_options() {
    let tool = PytestTool::new()
        .verbose(false)
        .color(false)
        .capture("no")
        .module("main")
        .k("parser and not slow")
        .x(true)
        .warnings(false)
        .opts("--tb=short -p no:cacheprovider")
        .unwrap();

    assert_eq!(
        line(&tool),
        "pytest --capture=no --tb=short -p no:cacheprovider -k 'parser and not slow' -x \
         --disable-warnings tests/main.py"
    );
}

#[test]
fn test_pytest_does_not_duplicate_flags_from_opts() {
    let tool = PytestTool::new()
        .k("other")
        .x(true)
        .warnings(false)
        .opts("-k mine -x --disable-warnings")
        .unwrap();

    assert_eq!(
        line(&tool),
        "pytest --verbose --color=yes --capture=sys -k mine -x --disable-warnings"
    );
}

#[test]
fn test_pytest_opts_keep_quoted_expression() {
    let tool = PytestTool::new()
        .opts("-k 'parser and not slow' --tb=short")
        .unwrap();

    assert_eq!(
        tool.command(&context(false)).get_args(),
        [
            "--verbose",
            "--color=yes",
            "--capture=sys",
            "-k",
            "parser and not slow",
            "--tb=short"
        ]
    );
}

#[test]
fn test_pytest_opts_unbalanced_quote() {
    let err = PytestTool::new().opts("-k 'parser").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Can't split options: -k 'parser");
}

#[test]
fn test_pytest_integration_suite() {
    assert_eq!(
        line(&PytestTool::new().suite(Suite::Integration)),
        "pytest --verbose --color=yes --capture=sys integration/"
    );
    assert_eq!(
        line(
            &PytestTool::new()
                .suite(Suite::Integration)
                .module("connection")
                .x(true)
        ),
        "pytest --verbose --color=yes --capture=sys integration/connection.py -x"
    );
}

#[test]
fn test_pytest_coverage() {
    let tool = PytestTool::new().coverage("html");

    assert_eq!(tool.coverage_report(), Some("html"));
    assert_eq!(
        line(&tool),
        "pytest --verbose --color=yes --capture=sys --cov --no-cov-on-fail --cov-report=html"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_pytest_dry_run() -> Result<()> {
    let logs = run_with_logs(|| async {
        PytestTool::new().module("cli").run(&context(true)).await
    })
    .await?;

    assert!(logs.contains("[dry-run] Would run the test suite"), "{logs}");
    assert!(logs.contains("tests/cli.py"), "{logs}");
    Ok(())
}
