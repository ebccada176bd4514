// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{PipOperation, PipTool, venv_pip};
use crate::tools::Tool;
use crate::tools::test_utils::{context, run_with_logs};

#[test]
fn test_pip_operations() {
    let ops = [
        PipTool::new().operation,
        PipTool::new().download_op().operation,
        PipTool::new().venv_op().operation,
        PipTool::new().venv_op().install_op().operation,
    ];
    assert_eq!(
        ops,
        [
            PipOperation::Install,
            PipOperation::Download,
            PipOperation::Venv,
            PipOperation::Install,
        ]
    );
}

#[test]
fn test_pip_download_command() -> Result<()> {
    let cmd = PipTool::new()
        .requirement("lexicon==2.0.1")
        .dest("/tmp/vendor")
        .download_op()
        .download_command(&context(false))?;
    assert_eq!(
        cmd.command_line(),
        "pip download --no-binary :all: --no-deps -d /tmp/vendor lexicon==2.0.1"
    );
    Ok(())
}

#[test]
fn test_pip_venv_command() -> Result<()> {
    let cmd = PipTool::new()
        .dest("/tmp/env")
        .venv_op()
        .venv_command(&context(false))?;
    assert_eq!(cmd.command_line(), "python -m venv /tmp/env");
    Ok(())
}

#[test]
fn test_pip_install_in_venv() -> Result<()> {
    let ctx = context(false);
    let tool = PipTool::new()
        .venv("/tmp/env")
        .pin_pip(Some("24.0"))
        .requirement("dist/pkg-1.0.tar.gz");

    assert_eq!(
        tool.pin_command(&ctx).map(|c| c.command_line()),
        Some("/tmp/env/bin/pip install pip==24.0".to_string())
    );
    assert_eq!(
        tool.install_command(&ctx)?.command_line(),
        "/tmp/env/bin/pip install --disable-pip-version-check dist/pkg-1.0.tar.gz"
    );
    Ok(())
}

#[test]
fn test_pip_no_pin_by_default() {
    assert!(PipTool::new().pin_command(&context(false)).is_none());
    assert!(
        PipTool::new()
            .pin_pip(None::<String>)
            .pin_command(&context(false))
            .is_none()
    );
}

#[test]
fn test_pip_missing_requirement() {
    let err = PipTool::new().install_command(&context(false)).unwrap_err();
    assert_eq!(err.to_string(), "PipTool: requirement is required");
}

#[test]
fn test_venv_pip() {
    assert_eq!(
        venv_pip(Path::new("/tmp/env")),
        PathBuf::from("/tmp/env/bin/pip")
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_pip_install_dry_run_logs_both_steps() -> Result<()> {
    let logs = run_with_logs(|| async {
        PipTool::new()
            .venv("/tmp/env")
            .pin_pip(Some("24.0"))
            .requirement("dist/pkg-1.0-py3-none-any.whl")
            .run(&context(true))
            .await
    })
    .await?;

    assert!(logs.contains("[dry-run] Would pin pip"), "{logs}");
    assert!(logs.contains("[dry-run] Would install package"), "{logs}");
    assert!(!logs.contains("Installed cleanly"), "{logs}");
    Ok(())
}
