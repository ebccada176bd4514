// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Detached GPG signatures for release archives.
//!
//! ```text
//! <gpg> --detach-sign --armor --passphrase-fd=0 --batch --pinentry-mode=loopback <archive>
//!   stdin: "<passphrase>\n"
//! ```
//!
//! The passphrase is replayed to each invocation, so it is asked for once.

use std::path::{Path, PathBuf};

use crate::error::Result;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;

/// Executable names tried in order.
pub const GPG_CANDIDATES: [&str; 3] = ["gpg", "gpg1", "gpg2"];

/// Locates a GPG executable on PATH.
///
/// # Errors
///
/// Returns an error when none of [`GPG_CANDIDATES`] is installed.
pub fn find_gpg() -> Result<PathBuf> {
    find_gpg_with(ProcessBuilder::find)
}

fn find_gpg_with<F>(mut find: F) -> Result<PathBuf>
where
    F: FnMut(&str) -> Option<PathBuf>,
{
    GPG_CANDIDATES
        .iter()
        .find_map(|candidate| find(candidate))
        .ok_or_else(|| {
            anyhow::anyhow!("You need to have one of `gpg`, `gpg1` or `gpg2` installed to GPG-sign!")
        })
}

#[derive(Clone)]
pub struct GpgTool {
    program: Option<PathBuf>,
    archives: Vec<PathBuf>,
    passphrase: String,
}

impl std::fmt::Debug for GpgTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpgTool")
            .field("program", &self.program)
            .field("archives", &self.archives)
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

impl GpgTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            program: None,
            archives: Vec::new(),
            passphrase: String::new(),
        }
    }

    /// GPG executable; looked up with [`find_gpg`] when unset.
    #[must_use]
    pub fn program(mut self, program: impl AsRef<Path>) -> Self {
        self.program = Some(program.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn archives<I, P>(mut self, archives: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.archives
            .extend(archives.into_iter().map(|a| a.as_ref().to_path_buf()));
        self
    }

    #[must_use]
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    fn resolve_program(&self) -> Result<PathBuf> {
        match self.program {
            Some(ref program) => Ok(program.clone()),
            None => find_gpg(),
        }
    }

    /// Signing invocation for one archive, passphrase on stdin.
    #[must_use]
    pub fn sign_command(&self, gpg: &Path, archive: &Path) -> ProcessBuilder {
        ProcessBuilder::new(gpg)
            .args([
                "--detach-sign",
                "--armor",
                "--passphrase-fd=0",
                "--batch",
                "--pinentry-mode=loopback",
            ])
            .arg(archive)
            .stdin(format!("{}\n", self.passphrase))
    }

    async fn do_sign(&self, ctx: &ToolContext) -> Result<()> {
        // Missing gpg is reported even when dry-running.
        let gpg = self.resolve_program()?;
        debug!(gpg = %gpg.display(), "Using GPG");

        for archive in &self.archives {
            if ctx.is_cancelled() {
                anyhow::bail!("Signing was interrupted");
            }
            execute(ctx, self.sign_command(&gpg, archive), "sign archive").await?;
        }

        if !ctx.is_dry_run() {
            info!(count = self.archives.len(), "Archives signed");
        }
        Ok(())
    }
}

impl Default for GpgTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GpgTool {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_sign(ctx))
    }
}

#[cfg(test)]
mod tests;
