// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `setup.py` driver.
//!
//! ```text
//! Build  python setup.py [sdist -d <dir>/dist] [build -b <dir>/build bdist_wheel -d <dir>/dist]
//! Check  python setup.py check -r -s
//! ```
//!
//! [`get_archives`] lists what a build produced, wheels first so an index
//! sees their richer metadata before the sdist's.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;
use crate::utility::fs::walk::{WalkOptions, find_files};

/// Archive extensions in upload order.
pub const ARCHIVE_EXTENSIONS: [&str; 2] = ["whl", "tar.gz"];

/// Built archives under `<directory>/dist`, wheels before sdists.
///
/// A missing `dist/` yields an empty list.
///
/// # Errors
///
/// Returns an error if `dist/` cannot be scanned.
pub fn get_archives(directory: &Path) -> Result<Vec<PathBuf>> {
    let dist = directory.join("dist");
    if !dist.is_dir() {
        return Ok(Vec::new());
    }

    let options = WalkOptions::builder()
        .with_max_depth(1)
        .with_respect_gitignore(false)
        .build();
    let mut archives = Vec::new();
    for extension in ARCHIVE_EXTENSIONS {
        archives.extend(find_files(&dist, &format!("*.{extension}"), &options)?);
    }
    Ok(archives)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupOperation {
    #[default]
    Build,
    Check,
}

#[derive(Debug, Clone)]
pub struct SetupTool {
    sdist: bool,
    wheel: bool,
    clean: bool,
    directory: Option<PathBuf>,
    python: Option<PathBuf>,
    operation: SetupOperation,
}

impl SetupTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sdist: true,
            wheel: true,
            clean: false,
            directory: None,
            python: None,
            operation: SetupOperation::Build,
        }
    }

    #[must_use]
    pub const fn sdist(mut self, sdist: bool) -> Self {
        self.sdist = sdist;
        self
    }

    #[must_use]
    pub const fn wheel(mut self, wheel: bool) -> Self {
        self.wheel = wheel;
        self
    }

    /// Remove `dist/` and `build/` first.
    #[must_use]
    pub const fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Base directory holding `dist/` and `build/`; the working directory
    /// when unset.
    #[must_use]
    pub fn directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.directory = Some(directory.as_ref().to_path_buf());
        self
    }

    /// Interpreter running `setup.py`; `tools.python` when unset.
    #[must_use]
    pub fn python(mut self, python: impl AsRef<Path>) -> Self {
        self.python = Some(python.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn build_op(mut self) -> Self {
        self.operation = SetupOperation::Build;
        self
    }

    #[must_use]
    pub const fn check_op(mut self) -> Self {
        self.operation = SetupOperation::Check;
        self
    }

    fn base(&self) -> PathBuf {
        self.directory.clone().unwrap_or_default()
    }

    /// Where archives land.
    #[must_use]
    pub fn dist_dir(&self) -> PathBuf {
        self.base().join("dist")
    }

    /// Where wheel builds happen.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.base().join("build")
    }

    fn interpreter<'a>(&'a self, ctx: &'a ToolContext) -> &'a Path {
        self.python.as_deref().unwrap_or(&ctx.config().tools.python)
    }

    /// The build invocation.
    ///
    /// # Errors
    ///
    /// Returns an error when neither sdists nor wheels are requested.
    pub fn build_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        if !self.sdist && !self.wheel {
            anyhow::bail!(
                "You said no sdists and no wheels...what DO you want to build exactly?"
            );
        }

        let dist = self.dist_dir();
        let mut builder = ProcessBuilder::new(self.interpreter(ctx)).arg("setup.py");
        if self.sdist {
            builder = builder.arg("sdist").arg("-d").arg(&dist);
        }
        if self.wheel {
            builder = builder
                .arg("build")
                .arg("-b")
                .arg(self.build_dir())
                .arg("bdist_wheel")
                .arg("-d")
                .arg(&dist);
        }
        Ok(builder)
    }

    /// The long-description check invocation.
    #[must_use]
    pub fn check_command(&self, ctx: &ToolContext) -> ProcessBuilder {
        ProcessBuilder::new(self.interpreter(ctx)).args(["setup.py", "check", "-r", "-s"])
    }

    async fn do_clean(&self, ctx: &ToolContext) -> Result<()> {
        for dir in [self.dist_dir(), self.build_dir()] {
            if ctx.is_dry_run() {
                info!(dir = %dir.display(), "[dry-run] Would remove");
                continue;
            }
            if dir.is_dir() {
                fs::remove_dir_all(&dir)
                    .await
                    .with_context(|| format!("Failed to remove {}", dir.display()))?;
                debug!(dir = %dir.display(), "Removed");
            }
        }
        Ok(())
    }

    async fn do_build(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.build_command(ctx)?;
        if self.clean {
            self.do_clean(ctx).await?;
        }
        execute(ctx, builder, "build archives").await?;
        if !ctx.is_dry_run() {
            info!(dist = %self.dist_dir().display(), "Archives built");
        }
        Ok(())
    }

    async fn do_check(&self, ctx: &ToolContext) -> Result<()> {
        execute(ctx, self.check_command(ctx), "check package metadata").await?;
        Ok(())
    }
}

impl Default for SetupTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SetupTool {
    fn name(&self) -> &'static str {
        "setup.py"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                SetupOperation::Build => self.do_build(ctx).await,
                SetupOperation::Check => self.do_check(ctx).await,
            }
        })
    }
}
