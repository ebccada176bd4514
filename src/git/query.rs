// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::ChoresResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(path: &Path) -> ChoresResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Branch name as `git rev-parse --abbrev-ref HEAD` prints it: `HEAD` when detached.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn abbrev_head(path: &Path) -> ChoresResult<String> {
    Ok(current_branch(path)?.unwrap_or_else(|| "HEAD".to_string()))
}

/// List tag names.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or reference iteration fails.
pub fn tags(path: &Path) -> ChoresResult<Vec<String>> {
    GixBackend::tags(path)
}

/// Check for changes to tracked files, ignoring untracked ones.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or status check fails.
pub fn has_tracked_changes(path: &Path) -> ChoresResult<bool> {
    GixBackend::has_tracked_changes(path)
}
