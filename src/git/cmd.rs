// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (commit, tag, clone)
//! ```

use crate::error::ChoresResult;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend};

/// Commit all modified tracked files.
///
/// # Errors
///
/// Returns a `GitError` if the commit fails.
pub fn commit_all(repo_path: &Path, message: &str) -> ChoresResult<()> {
    ShellBackend::commit_all(repo_path, message)
}

/// Create an annotated tag at HEAD.
///
/// # Errors
///
/// Returns a `GitError` if the tag cannot be created.
pub fn tag_annotated(repo_path: &Path, name: &str, message: &str) -> ChoresResult<()> {
    ShellBackend::tag_annotated(repo_path, name, message)
}

/// Clone a repository.
///
/// # Errors
///
/// Returns a `GitError` if the clone operation fails or the destination path is invalid.
pub fn clone(url: &str, dest: &Path) -> ChoresResult<()> {
    ShellBackend::clone(url, dest)
}

/// Checkout a branch, tag, or commit.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn checkout(repo_path: &Path, what: &str) -> ChoresResult<()> {
    ShellBackend::checkout(repo_path, what)
}
