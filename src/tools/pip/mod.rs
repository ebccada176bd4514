// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Python package installer and virtualenv creation.
//!
//! ```text
//! Download  pip download --no-binary :all: --no-deps -d <dest> <requirement>
//! Venv      python -m venv <dest>
//! Install   [<venv>/bin/pip install pip==<pin>]
//!           <venv>/bin/pip install --disable-pip-version-check <requirement>
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipOperation {
    #[default]
    Install,
    Download,
    Venv,
}

#[derive(Debug, Clone)]
pub struct PipTool {
    requirement: Option<String>,
    dest: Option<PathBuf>,
    venv: Option<PathBuf>,
    pin_pip: Option<String>,
    operation: PipOperation,
}

impl PipTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requirement: None,
            dest: None,
            venv: None,
            pin_pip: None,
            operation: PipOperation::Install,
        }
    }

    /// What to install or download: a `name==version` requirement or an archive path.
    #[must_use]
    pub fn requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }

    /// Download directory, or the virtualenv to create.
    #[must_use]
    pub fn dest(mut self, dest: impl AsRef<Path>) -> Self {
        self.dest = Some(dest.as_ref().to_path_buf());
        self
    }

    /// Install with the pip inside this virtualenv.
    #[must_use]
    pub fn venv(mut self, venv: impl AsRef<Path>) -> Self {
        self.venv = Some(venv.as_ref().to_path_buf());
        self
    }

    /// Upgrade or downgrade the venv's own pip before installing.
    #[must_use]
    pub fn pin_pip(mut self, version: Option<impl Into<String>>) -> Self {
        self.pin_pip = version.map(Into::into);
        self
    }

    #[must_use]
    pub const fn install_op(mut self) -> Self {
        self.operation = PipOperation::Install;
        self
    }

    #[must_use]
    pub const fn download_op(mut self) -> Self {
        self.operation = PipOperation::Download;
        self
    }

    #[must_use]
    pub const fn venv_op(mut self) -> Self {
        self.operation = PipOperation::Venv;
        self
    }

    fn requirement_required(&self) -> Result<&str> {
        self.requirement
            .as_deref()
            .context("PipTool: requirement is required")
    }

    fn dest_required(&self) -> Result<&Path> {
        self.dest
            .as_deref()
            .context("PipTool: destination is required")
    }

    fn pip(&self, ctx: &ToolContext) -> ProcessBuilder {
        match self.venv {
            Some(ref venv) => ProcessBuilder::new(venv_pip(venv)),
            None => ProcessBuilder::new(&ctx.config().tools.pip),
        }
    }

    /// Source-only download of a single distribution, no dependencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the requirement or destination is missing.
    pub fn download_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        Ok(self
            .pip(ctx)
            .args(["download", "--no-binary", ":all:", "--no-deps", "-d"])
            .arg(self.dest_required()?)
            .arg(self.requirement_required()?))
    }

    /// # Errors
    ///
    /// Returns an error if the destination is missing.
    pub fn venv_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(&ctx.config().tools.python)
            .args(["-m", "venv"])
            .arg(self.dest_required()?))
    }

    /// The pip pin step, when one is configured.
    #[must_use]
    pub fn pin_command(&self, ctx: &ToolContext) -> Option<ProcessBuilder> {
        self.pin_pip.as_ref().map(|version| {
            self.pip(ctx)
                .arg("install")
                .arg(format!("pip=={version}"))
        })
    }

    /// # Errors
    ///
    /// Returns an error if the requirement is missing.
    pub fn install_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        Ok(self
            .pip(ctx)
            .args(["install", "--disable-pip-version-check"])
            .arg(self.requirement_required()?))
    }

    async fn do_install(&self, ctx: &ToolContext) -> Result<()> {
        let install = self.install_command(ctx)?;
        if let Some(pin) = self.pin_command(ctx) {
            execute(ctx, pin, "pin pip").await?;
        }
        if execute(ctx, install, "install package").await?.is_some() {
            info!(requirement = ?self.requirement, "Installed cleanly");
        }
        Ok(())
    }

    async fn do_download(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.download_command(ctx)?;
        debug!(requirement = ?self.requirement, "Downloading source distribution");
        execute(ctx, builder, "download source distribution").await?;
        Ok(())
    }

    async fn do_venv(&self, ctx: &ToolContext) -> Result<()> {
        execute(ctx, self.venv_command(ctx)?, "create virtualenv").await?;
        Ok(())
    }
}

/// The pip executable inside a virtualenv.
#[must_use]
pub fn venv_pip(venv: &Path) -> PathBuf {
    venv.join("bin").join("pip")
}

impl Default for PipTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for PipTool {
    fn name(&self) -> &'static str {
        "pip"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                PipOperation::Install => self.do_install(ctx).await,
                PipOperation::Download => self.do_download(ctx).await,
                PipOperation::Venv => self.do_venv(ctx).await,
            }
        })
    }
}

#[cfg(test)]
mod tests;
