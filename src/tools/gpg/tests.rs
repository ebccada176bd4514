// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{GpgTool, find_gpg_with};
use crate::tools::Tool;
use crate::tools::test_utils::{context, run_with_logs};

#[test]
fn test_find_gpg_prefers_first_candidate() -> Result<()> {
    let found = find_gpg_with(|name| match name {
        "gpg1" | "gpg2" => Some(PathBuf::from(format!("/usr/bin/{name}"))),
        _ => None,
    })?;
    assert_eq!(found, PathBuf::from("/usr/bin/gpg1"));
    Ok(())
}

#[test]
fn test_find_gpg_none_installed() {
    let err = find_gpg_with(|_| None).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"You need to have one of `gpg`, `gpg1` or `gpg2` installed to GPG-sign!"
    );
}

#[test]
fn test_gpg_sign_command() {
    let tool = GpgTool::new().passphrase("hunter2");
    assert_eq!(
        tool.sign_command(Path::new("gpg2"), Path::new("dist/pkg-1.0.tar.gz"))
            .command_line(),
        "gpg2 --detach-sign --armor --passphrase-fd=0 --batch --pinentry-mode=loopback dist/pkg-1.0.tar.gz"
    );
}

#[test]
fn test_gpg_debug_hides_passphrase() {
    let tool = GpgTool::new().passphrase("hunter2");
    let debug = format!("{tool:?}");
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("<redacted>"));
}

#[tokio::test(flavor = "current_thread")]
async fn test_gpg_dry_run_signs_each_archive() -> Result<()> {
    let logs = run_with_logs(|| async {
        GpgTool::new()
            .program("gpg")
            .archives(["dist/a.whl", "dist/a.tar.gz"])
            .run(&context(true))
            .await
    })
    .await?;

    assert_eq!(logs.matches("[dry-run] Would sign archive").count(), 2, "{logs}");
    assert!(logs.contains("dist/a.whl"), "{logs}");
    assert!(logs.contains("dist/a.tar.gz"), "{logs}");
    Ok(())
}

#[test]
fn test_gpg_tool_name() {
    assert_eq!(GpgTool::default().name(), "gpg");
}
