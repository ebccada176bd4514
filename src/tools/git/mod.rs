// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git tool for operations that touch remotes.
//!
//! ```text
//! GitTool
//! Operations: Push | Clone | Checkout
//! Builder: path/url/target/ci
//! ```
//!
//! Pushing a dry run still talks to the remote with `git push --dry-run`,
//! except on CI where there are usually no credentials and only the
//! command is logged.
//!
//! For local queries and commits, use `crate::git`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tracing::{debug, info, warn};

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;
use crate::git::query::{has_tracked_changes, is_git_repo};

/// Git operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitOperation {
    /// Push commits and their annotated tags.
    #[default]
    Push,
    /// Clone a repository.
    Clone,
    /// Checkout a branch, tag, or commit.
    Checkout,
}

#[derive(Debug, Clone)]
pub struct GitTool {
    path: Option<PathBuf>,
    url: Option<String>,
    target: Option<String>,
    ci: bool,
    operation: GitOperation,
}

impl GitTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            path: None,
            url: None,
            target: None,
            ci: false,
            operation: GitOperation::Push,
        }
    }

    /// Repository to work in, or the clone destination.
    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Whether we are running under CI.
    #[must_use]
    pub const fn ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    #[must_use]
    pub const fn push_op(mut self) -> Self {
        self.operation = GitOperation::Push;
        self
    }

    #[must_use]
    pub const fn clone_op(mut self) -> Self {
        self.operation = GitOperation::Clone;
        self
    }

    #[must_use]
    pub const fn checkout_op(mut self) -> Self {
        self.operation = GitOperation::Checkout;
        self
    }

    fn git(&self, ctx: &ToolContext) -> ProcessBuilder {
        let builder = ProcessBuilder::new(&ctx.config().tools.git);
        match self.path {
            Some(ref path) if self.operation != GitOperation::Clone => builder.cwd(path),
            _ => builder,
        }
    }

    /// `git push --follow-tags --no-verify`, plus `--dry-run` when rehearsing.
    #[must_use]
    pub fn push_command(&self, ctx: &ToolContext, rehearse: bool) -> ProcessBuilder {
        let builder = self
            .git(ctx)
            .args(["push", "--follow-tags", "--no-verify"]);
        if rehearse {
            builder.arg("--dry-run")
        } else {
            builder
        }
    }

    /// `git clone <url> <path>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the url or path is missing.
    pub fn clone_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let url = self
            .url
            .as_ref()
            .context("GitTool: url is required for clone")?;
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for clone")?;
        Ok(self.git(ctx).arg("clone").arg(url).arg(path))
    }

    /// `git -c advice.detachedHead=false checkout -q <target>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is missing.
    pub fn checkout_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let target = self
            .target
            .as_ref()
            .context("GitTool: target is required for checkout")?;
        Ok(self
            .git(ctx)
            .args(["-c", "advice.detachedHead=false", "checkout", "-q"])
            .arg(target))
    }

    async fn do_push(&self, ctx: &ToolContext) -> Result<()> {
        if !ctx.is_dry_run() {
            execute(ctx, self.push_command(ctx, false), "push").await?;
            info!("Pushed commits and tags");
            return Ok(());
        }

        if self.ci {
            // No push credentials on CI; just say what would happen.
            execute(ctx, self.push_command(ctx, false), "push").await?;
            return Ok(());
        }

        let builder = self.push_command(ctx, true);
        info!(cmd = %builder.command_line(), "[dry-run] Rehearsing push");
        execute(&ctx.with_dry_run(false), builder, "rehearse push").await?;
        Ok(())
    }

    async fn do_clone(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.clone_command(ctx)?;
        debug!(url = ?self.url, "Cloning repository");
        execute(ctx, builder, "clone repository").await?;
        Ok(())
    }

    async fn do_checkout(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.checkout_command(ctx)?;

        if let Some(ref path) = self.path
            && !ctx.is_dry_run()
            && is_git_repo(path)
        {
            match has_tracked_changes(path) {
                Ok(true) => warn!(
                    path = %path.display(),
                    target = ?self.target,
                    "Repository has uncommitted changes, checkout may fail"
                ),
                Err(e) => debug!(error = %e, "Could not check for uncommitted changes"),
                Ok(false) => {}
            }
        }

        execute(ctx, builder, "checkout").await?;
        Ok(())
    }
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GitTool {
    fn name(&self) -> &'static str {
        "git"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                GitOperation::Push => self.do_push(ctx).await,
                GitOperation::Clone => self.do_clone(ctx).await,
                GitOperation::Checkout => self.do_checkout(ctx).await,
            }
        })
    }
}

#[cfg(test)]
mod tests;
