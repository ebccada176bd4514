// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{find_source_archive, unpacked_name, vendorize};
use crate::cli::chores::VendorizeArgs;
use crate::git::tests::init_test_repo_with_commit;
use crate::tools::test_utils::{context, run_with_logs};
use anyhow::Result;
use tempfile::TempDir;

fn git(path: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(path)
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

/// Upstream repository with a `lexicon` package tagged `2.0.1`, plus a
/// later commit that must not be vendorized.
fn upstream() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    init_test_repo_with_commit(root, "main").unwrap();

    std::fs::create_dir_all(root.join("lexicon/providers")).unwrap();
    std::fs::write(root.join("lexicon/__init__.py"), "VERSION = '2.0.1'\n").unwrap();
    std::fs::write(root.join("lexicon/providers/base.py"), "").unwrap();
    std::fs::write(root.join("LICENSE"), "MIT\n").unwrap();
    git(root, &["add", "--all"]);
    git(root, &["commit", "--quiet", "-m", "Release"]);
    git(root, &["tag", "-a", "2.0.1", "-m", "2.0.1"]);

    std::fs::write(root.join("lexicon/__init__.py"), "VERSION = '3.0.0'\n").unwrap();
    git(root, &["commit", "--quiet", "-am", "Next"]);
    temp
}

fn git_args(url: &Path) -> VendorizeArgs {
    VendorizeArgs {
        distribution: "lexicon".to_string(),
        version: "2.0.1".to_string(),
        vendor_dir: PathBuf::from("mypkg/vendor"),
        package: None,
        git_url: Some(url.display().to_string()),
        license: Some(PathBuf::from("LICENSE")),
    }
}

#[test]
fn test_unpacked_name() {
    assert_eq!(
        unpacked_name(Path::new("/tmp/x/lexicon-2.0.1.tar.gz")).as_deref(),
        Some("lexicon-2.0.1")
    );
    assert_eq!(
        unpacked_name(Path::new("lexicon-2.0.1.zip")).as_deref(),
        Some("lexicon-2.0.1")
    );
    assert_eq!(unpacked_name(Path::new("lexicon-2.0.1.whl")), None);
}

#[test]
fn test_find_source_archive() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("notes.txt"), "").unwrap();
    assert!(find_source_archive(temp.path()).is_err());

    std::fs::write(temp.path().join("lexicon-2.0.1.tar.gz"), "").unwrap();
    assert_eq!(
        find_source_archive(temp.path()).unwrap(),
        temp.path().join("lexicon-2.0.1.tar.gz")
    );
}

#[tokio::test]
async fn test_vendorize_from_git_replaces_target() {
    let upstream = upstream();
    let project = tempfile::tempdir().unwrap();
    let target = project.path().join("mypkg/vendor/lexicon");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("stale.py"), "").unwrap();

    vendorize(&context(false), project.path(), &git_args(upstream.path()))
        .await
        .unwrap();

    assert!(!target.join("stale.py").exists());
    assert!(target.join("providers/base.py").is_file());
    assert_eq!(
        std::fs::read_to_string(target.join("__init__.py")).unwrap(),
        "VERSION = '2.0.1'\n"
    );
    assert_eq!(
        std::fs::read_to_string(target.join("LICENSE")).unwrap(),
        "MIT\n"
    );
}

#[tokio::test]
async fn test_vendorize_missing_package() {
    let upstream = upstream();
    let project = tempfile::tempdir().unwrap();
    let args = VendorizeArgs {
        package: Some("nope".to_string()),
        ..git_args(upstream.path())
    };

    let err = vendorize(&context(false), project.path(), &args)
        .await
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Source package lexicon/nope doesn't exist!");
}

#[tokio::test]
async fn test_vendorize_dry_run_touches_nothing() -> Result<()> {
    let project = tempfile::tempdir()?;
    let args = VendorizeArgs {
        git_url: None,
        ..git_args(Path::new("unused"))
    };

    let logs = run_with_logs(|| async { vendorize(&context(true), project.path(), &args).await })
        .await?;

    assert!(logs.contains("[dry-run] Would download source distribution"), "{logs}");
    assert!(logs.contains("lexicon==2.0.1"), "{logs}");
    assert!(logs.contains("[dry-run] Would replace vendorized folder"), "{logs}");
    assert!(!project.path().join("mypkg").exists());
    Ok(())
}
