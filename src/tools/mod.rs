// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wrappers around the external programs chores drive.
//!
//! ```text
//! cmd handler --> Tool builder --> command() --> ProcessBuilder
//!                      |                            |
//!                 ToolContext                run_with_cancellation
//!          (config, cancel token, dry)              |
//!                      |                      ProcessOutput
//!                 dry run? --> "[dry-run] Would run ..."
//! ```
//!
//! Every tool exposes the command it would run so handlers and tests can
//! inspect it without spawning anything.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::error::Result;

pub mod blacken;
pub mod editor;
pub mod extractor;
pub mod git;
pub mod gpg;
pub mod opener;
pub mod pip;
pub mod pytest;
pub mod setup;
pub mod sphinx;
pub mod sudo;
pub mod twine;

use futures_util::future::BoxFuture;

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Cancellation token for cooperative cancellation.
    cancel_token: CancellationToken,

    /// When true, tools log what they would do without doing it.
    dry_run: bool,

    config: Arc<Config>,
}

impl ToolContext {
    /// Creates a new `ToolContext`.
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
            config,
        }
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Returns a reference to the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Same context with dry-run switched on or off.
    #[must_use]
    pub fn with_dry_run(&self, dry_run: bool) -> Self {
        Self {
            dry_run,
            ..self.clone()
        }
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A chore step backed by an external program.
///
/// - Use `ProcessBuilder::run_with_cancellation()` for process execution.
/// - Respect `ctx.is_dry_run()` and only log actions.
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "pytest", "sphinx", "twine").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

/// Runs `builder` unless dry-running, failing when the process is interrupted.
///
/// Returns `None` in dry-run mode.
///
/// # Errors
///
/// Returns an error if the process fails to spawn, exits outside its success
/// codes, or is interrupted.
pub(crate) async fn execute(
    ctx: &ToolContext,
    builder: ProcessBuilder,
    what: &str,
) -> Result<Option<ProcessOutput>> {
    if ctx.is_dry_run() {
        info!(cmd = %builder.command_line(), "[dry-run] Would {what}");
        return Ok(None);
    }

    let output = builder
        .run_with_cancellation(ctx.cancel_token().clone())
        .await
        .with_context(|| format!("Failed to {what}"))?;

    if output.is_interrupted() {
        anyhow::bail!("Interrupted while trying to {what}");
    }

    Ok(Some(output))
}

#[cfg(test)]
pub(crate) mod test_utils;
