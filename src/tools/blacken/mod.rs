// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatter tool.
//!
//! ```text
//! folders --find_files("**/*.py")--> black -l <N> [--check] <files...>
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tracing::{info, warn};

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;
use crate::utility::fs::walk::{WalkOptions, find_files};

#[derive(Debug, Clone)]
pub struct BlackenTool {
    line_length: Option<u16>,
    folders: Vec<PathBuf>,
    check: bool,
    root: Option<PathBuf>,
}

impl BlackenTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line_length: None,
            folders: Vec::new(),
            check: false,
            root: None,
        }
    }

    /// Overrides `blacken.line_length`.
    #[must_use]
    pub const fn line_length(mut self, line_length: u16) -> Self {
        self.line_length = Some(line_length);
        self
    }

    /// Adds a folder; any folder given replaces `blacken.folders`.
    #[must_use]
    pub fn folder(mut self, folder: impl AsRef<Path>) -> Self {
        self.folders.push(folder.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn folders<I, P>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.folders
            .extend(folders.into_iter().map(|f| f.as_ref().to_path_buf()));
        self
    }

    /// Only report files that would be reformatted.
    #[must_use]
    pub const fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Directory relative folders are resolved against.
    #[must_use]
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    fn effective_folders<'a>(&'a self, ctx: &'a ToolContext) -> &'a [PathBuf] {
        if self.folders.is_empty() {
            &ctx.config().blacken.folders
        } else {
            &self.folders
        }
    }

    /// Every `*.py` file under the effective folders, sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if a folder cannot be walked.
    pub fn collect_files(&self, ctx: &ToolContext) -> Result<Vec<PathBuf>> {
        let root = self.root.as_deref().unwrap_or_else(|| Path::new("."));
        let options = WalkOptions::for_python_project();
        let mut files = Vec::new();
        for folder in self.effective_folders(ctx) {
            let dir = root.join(folder);
            if !dir.is_dir() {
                warn!(folder = %dir.display(), "Skipping missing folder");
                continue;
            }
            files.extend(
                find_files(&dir, "**/*.py", &options)
                    .with_context(|| format!("Failed to scan {}", dir.display()))?,
            );
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// The formatter invocation for `files`.
    #[must_use]
    pub fn command(&self, ctx: &ToolContext, files: &[PathBuf]) -> ProcessBuilder {
        let config = ctx.config();
        let line_length = self.line_length.unwrap_or(config.blacken.line_length);

        let mut builder = ProcessBuilder::new(&config.tools.black)
            .arg("-l")
            .arg(line_length.to_string());
        if self.check {
            builder = builder.arg("--check");
        }
        builder.args(files)
    }

    async fn do_blacken(&self, ctx: &ToolContext) -> Result<()> {
        let files = self.collect_files(ctx)?;
        if files.is_empty() {
            info!("No Python files found, nothing to format");
            return Ok(());
        }

        let verb = if self.check {
            "check formatting"
        } else {
            "reformat sources"
        };
        execute(ctx, self.command(ctx, &files), verb).await?;

        if !ctx.is_dry_run() {
            info!(files = files.len(), check = self.check, "Formatter finished");
        }
        Ok(())
    }
}

impl Default for BlackenTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for BlackenTool {
    fn name(&self) -> &'static str {
        "black"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_blacken(ctx))
    }
}
