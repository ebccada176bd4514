// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitOperation, GitTool};
use crate::tools::Tool;
use crate::tools::test_utils::{context, run_with_logs};
use anyhow::Result;

#[test]
fn test_git_tool_all_operations() {
    let ops = [
        GitTool::new().operation,
        GitTool::new().clone_op().operation,
        GitTool::new().checkout_op().operation,
        GitTool::new().clone_op().push_op().operation,
    ];
    assert_eq!(
        ops,
        [
            GitOperation::Push,
            GitOperation::Clone,
            GitOperation::Checkout,
            GitOperation::Push,
        ]
    );
}

#[test]
fn test_git_push_command() {
    let ctx = context(false);
    let tool = GitTool::new().path("/repo");

    assert_eq!(
        tool.push_command(&ctx, false).command_line(),
        "git push --follow-tags --no-verify"
    );
    assert_eq!(
        tool.push_command(&ctx, true).command_line(),
        "git push --follow-tags --no-verify --dry-run"
    );
    assert_eq!(
        tool.push_command(&ctx, false)
            .working_dir()
            .map(|p| p.display().to_string()),
        Some("/repo".to_string())
    );
}

#[test]
fn test_git_clone_command() -> Result<()> {
    let cmd = GitTool::new()
        .url("https://github.com/example/lib.git")
        .path("/tmp/lib")
        .clone_op()
        .clone_command(&context(false))?;

    assert_eq!(
        cmd.command_line(),
        "git clone https://github.com/example/lib.git /tmp/lib"
    );
    assert!(cmd.working_dir().is_none());
    Ok(())
}

#[test]
fn test_git_clone_requires_url_and_path() {
    let ctx = context(false);
    let no_url = GitTool::new().path("/tmp/lib").clone_command(&ctx);
    let no_path = GitTool::new().url("u").clone_command(&ctx);

    assert_eq!(
        no_url.unwrap_err().to_string(),
        "GitTool: url is required for clone"
    );
    assert_eq!(
        no_path.unwrap_err().to_string(),
        "GitTool: path is required for clone"
    );
}

#[test]
fn test_git_checkout_command() -> Result<()> {
    let cmd = GitTool::new()
        .path("/tmp/lib")
        .target("v1.2.0")
        .checkout_op()
        .checkout_command(&context(false))?;

    assert_eq!(
        cmd.command_line(),
        "git -c advice.detachedHead=false checkout -q v1.2.0"
    );
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn test_git_push_dry_run_on_ci_only_logs() -> Result<()> {
    let logs = run_with_logs(|| async {
        GitTool::new().ci(true).push_op().run(&context(true)).await
    })
    .await?;

    assert!(logs.contains("[dry-run] Would push"), "{logs}");
    assert!(!logs.contains("--dry-run"), "{logs}");
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn test_git_checkout_dry_run() -> Result<()> {
    let logs = run_with_logs(|| async {
        GitTool::new()
            .path("/tmp/lib")
            .target("main")
            .checkout_op()
            .run(&context(true))
            .await
    })
    .await?;

    assert!(logs.contains("[dry-run] Would checkout"), "{logs}");
    Ok(())
}

#[test]
fn test_git_tool_name() {
    assert_eq!(GitTool::default().name(), "git");
}
