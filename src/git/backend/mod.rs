// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)  --> GixBackend (pure Rust gix) | ShellBackend
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{ChoresResult, GitError, GixError};
use std::path::Path;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> ChoresResult<Option<String>>;

    /// List tag names in the repository, unsorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or reference iteration fails.
    fn tags(path: &Path) -> ChoresResult<Vec<String>>;

    /// Check for staged or unstaged changes to tracked files.
    ///
    /// Untracked files are ignored.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn has_tracked_changes(path: &Path) -> ChoresResult<bool>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Commit every modified tracked file (`git commit -a`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit fails.
    fn commit_all(repo_path: &Path, message: &str) -> ChoresResult<()>;

    /// Create an annotated tag at HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the tag exists or cannot be created.
    fn tag_annotated(repo_path: &Path, name: &str, message: &str) -> ChoresResult<()>;

    /// Clone a repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone operation fails or the destination path is invalid.
    fn clone(url: &str, dest: &Path) -> ChoresResult<()>;

    /// Checkout a branch, tag, or commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout(repo_path: &Path, what: &str) -> ChoresResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides efficient read-only operations without spawning subprocesses.
pub struct GixBackend;

fn discover(path: &Path) -> ChoresResult<gix::Repository> {
    Ok(gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?)
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn current_branch(path: &Path) -> ChoresResult<Option<String>> {
        let repo = discover(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn tags(path: &Path) -> ChoresResult<Vec<String>> {
        let repo = discover(path)?;
        let failed = |message: String| GitError::CommandFailed {
            command: "tag --list".to_string(),
            message,
        };

        let references = repo.references().map_err(|e| failed(e.to_string()))?;
        let mut tags = Vec::new();
        for reference in references.tags().map_err(|e| failed(e.to_string()))? {
            let reference = reference.map_err(|e| failed(e.to_string()))?;
            tags.push(reference.name().shorten().to_string());
        }
        Ok(tags)
    }

    fn has_tracked_changes(path: &Path) -> ChoresResult<bool> {
        use gix::status::UntrackedFiles;

        let repo = discover(path)?;

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(UntrackedFiles::None)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Used for every write: commits and annotated tags need the user's
/// signing and hook configuration exactly as the CLI applies it.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> ChoresResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitMutation for ShellBackend {
    fn commit_all(repo_path: &Path, message: &str) -> ChoresResult<()> {
        Self::git_command(&["commit", "--quiet", "-am", message], repo_path)?;
        Ok(())
    }

    fn tag_annotated(repo_path: &Path, name: &str, message: &str) -> ChoresResult<()> {
        Self::git_command(&["tag", "-a", name, "-m", message], repo_path)?;
        Ok(())
    }

    fn clone(url: &str, dest: &Path) -> ChoresResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CommandFailed {
            command: "git clone".to_string(),
            message: "invalid destination path".to_string(),
        })?;
        let parent = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::git_command(&["clone", "--quiet", url, dest_str], parent)?;
        Ok(())
    }

    fn checkout(repo_path: &Path, what: &str) -> ChoresResult<()> {
        Self::git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", what],
            repo_path,
        )?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--is-inside-work-tree"], path).is_ok()
    }

    fn current_branch(path: &Path) -> ChoresResult<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn tags(path: &Path) -> ChoresResult<Vec<String>> {
        let output = Self::git_command(&["tag", "--list"], path)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn has_tracked_changes(path: &Path) -> ChoresResult<bool> {
        let output =
            Self::git_command(&["status", "--porcelain", "--untracked-files=no"], path)?;
        Ok(!output.is_empty())
    }
}
