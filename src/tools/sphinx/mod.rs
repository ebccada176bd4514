// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Documentation tool.
//!
//! ```text
//! SphinxTool
//! Operations: Build | Clean | Browse | Doctest | Tree
//!
//! Build    sphinx-build [opts...] [-n -W -T] <source> <target>
//! Clean    rm -r <target>
//! Browse   open <target>/<target_file>
//! Doctest  sphinx-build -b doctest <source> <tmpdir>
//! Tree     tree -Ca -I "<ignores>" <source>
//! ```
//!
//! Source and target default to `[sphinx]`; pass a site's resolved config
//! with [`SphinxTool::site`] to build `sites/<name>`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use super::opener::OpenTool;
use super::{BoxFuture, Tool, ToolContext, execute};
use crate::config::types::SphinxConfig;
use crate::core::process::builder::ProcessBuilder;
use crate::utility::fs::scratch::ScratchDir;
use crate::utility::shell::split_words;

/// Patterns `tree` leaves out of the listing.
pub const TREE_IGNORES: &str = ".git|*.pyc|*.swp|dist|*.egg-info|_static|_build|_templates";

/// Extra flags for nitpicky builds.
pub const NITPICK_FLAGS: [&str; 3] = ["-n", "-W", "-T"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SphinxOperation {
    #[default]
    Build,
    Clean,
    Browse,
    Doctest,
    Tree,
}

#[derive(Debug, Clone)]
pub struct SphinxTool {
    site: Option<SphinxConfig>,
    source: Option<PathBuf>,
    target: Option<PathBuf>,
    opts: Vec<String>,
    clean: bool,
    browse: bool,
    nitpick: bool,
    quiet: bool,
    operation: SphinxOperation,
}

impl SphinxTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            site: None,
            source: None,
            target: None,
            opts: Vec::new(),
            clean: false,
            browse: false,
            nitpick: false,
            quiet: false,
            operation: SphinxOperation::Build,
        }
    }

    /// Uses a site's resolved layout instead of `[sphinx]`.
    #[must_use]
    pub fn site(mut self, site: SphinxConfig) -> Self {
        self.site = Some(site);
        self
    }

    /// Overrides the source directory.
    #[must_use]
    pub fn source(mut self, source: impl AsRef<Path>) -> Self {
        self.source = Some(source.as_ref().to_path_buf());
        self
    }

    /// Overrides the output directory.
    #[must_use]
    pub fn target(mut self, target: impl AsRef<Path>) -> Self {
        self.target = Some(target.as_ref().to_path_buf());
        self
    }

    /// Extra `sphinx-build` options, split like a shell command line.
    ///
    /// # Errors
    ///
    /// Returns an error if `opts` has unbalanced quotes.
    pub fn opts(mut self, opts: &str) -> Result<Self> {
        self.opts.extend(split_words(opts)?);
        Ok(self)
    }

    /// Remove the output directory before building.
    #[must_use]
    pub const fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Open the result after building.
    #[must_use]
    pub const fn browse(mut self, browse: bool) -> Self {
        self.browse = browse;
        self
    }

    /// Treat warnings as errors and flag every broken reference.
    #[must_use]
    pub const fn nitpick(mut self, nitpick: bool) -> Self {
        self.nitpick = nitpick;
        self
    }

    /// Discard `sphinx-build` output.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub const fn build_op(mut self) -> Self {
        self.operation = SphinxOperation::Build;
        self
    }

    #[must_use]
    pub const fn clean_op(mut self) -> Self {
        self.operation = SphinxOperation::Clean;
        self
    }

    #[must_use]
    pub const fn browse_op(mut self) -> Self {
        self.operation = SphinxOperation::Browse;
        self
    }

    #[must_use]
    pub const fn doctest_op(mut self) -> Self {
        self.operation = SphinxOperation::Doctest;
        self
    }

    #[must_use]
    pub const fn tree_op(mut self) -> Self {
        self.operation = SphinxOperation::Tree;
        self
    }

    fn layout<'a>(&'a self, ctx: &'a ToolContext) -> &'a SphinxConfig {
        self.site.as_ref().unwrap_or(&ctx.config().sphinx)
    }

    /// Effective source directory.
    #[must_use]
    pub fn source_dir(&self, ctx: &ToolContext) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| self.layout(ctx).source.clone())
    }

    /// Effective output directory.
    #[must_use]
    pub fn target_dir(&self, ctx: &ToolContext) -> PathBuf {
        self.target
            .clone()
            .unwrap_or_else(|| self.layout(ctx).target.clone())
    }

    /// File opened by `Browse`.
    #[must_use]
    pub fn target_file(&self, ctx: &ToolContext) -> PathBuf {
        self.target_dir(ctx).join(&self.layout(ctx).target_file)
    }

    /// The `sphinx-build` invocation writing into `target`.
    #[must_use]
    pub fn build_command(&self, ctx: &ToolContext, target: &Path) -> ProcessBuilder {
        let mut builder =
            ProcessBuilder::new(&ctx.config().tools.sphinx_build).args(&self.opts);
        if self.nitpick {
            builder = builder.args(NITPICK_FLAGS);
        }
        builder = builder.arg(self.source_dir(ctx)).arg(target);
        if self.quiet {
            builder.quiet()
        } else {
            builder.inherit_stdio()
        }
    }

    /// The `tree` invocation listing the source directory.
    #[must_use]
    pub fn tree_command(&self, ctx: &ToolContext) -> ProcessBuilder {
        ProcessBuilder::new(&ctx.config().tools.tree)
            .arg("-Ca")
            .arg("-I")
            .arg(TREE_IGNORES)
            .arg(self.source_dir(ctx))
            .inherit_stdio()
    }

    async fn do_clean(&self, ctx: &ToolContext) -> Result<()> {
        let target = self.target_dir(ctx);

        if ctx.is_dry_run() {
            info!(target = %target.display(), "[dry-run] Would remove docs build directory");
            return Ok(());
        }

        if target.is_dir() {
            fs::remove_dir_all(&target)
                .await
                .with_context(|| format!("Failed to remove {}", target.display()))?;
            info!(target = %target.display(), "Docs build directory removed");
        } else {
            debug!(target = %target.display(), "Docs build directory does not exist");
        }
        Ok(())
    }

    async fn do_browse(&self, ctx: &ToolContext) -> Result<()> {
        OpenTool::new().path(self.target_file(ctx)).run(ctx).await
    }

    async fn do_build(&self, ctx: &ToolContext) -> Result<()> {
        if self.clean {
            self.do_clean(ctx).await?;
        }

        let target = self.target_dir(ctx);
        execute(ctx, self.build_command(ctx, &target), "build docs").await?;

        if !ctx.is_dry_run() {
            info!(target = %target.display(), "Docs built");
        }
        if self.browse {
            self.do_browse(ctx).await?;
        }
        Ok(())
    }

    async fn do_doctest(&self, ctx: &ToolContext) -> Result<()> {
        let scratch = ScratchDir::new(None, false).context("Failed to create doctest directory")?;
        let mut tool = self.clone();
        tool.opts.extend(["-b".to_string(), "doctest".to_string()]);
        execute(
            ctx,
            tool.build_command(ctx, scratch.path()),
            "run doctests",
        )
        .await?;
        Ok(())
    }

    async fn do_tree(&self, ctx: &ToolContext) -> Result<()> {
        execute(ctx, self.tree_command(ctx), "list docs tree").await?;
        Ok(())
    }
}

impl Default for SphinxTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SphinxTool {
    fn name(&self) -> &'static str {
        "sphinx"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                SphinxOperation::Build => self.do_build(ctx).await,
                SphinxOperation::Clean => self.do_clean(ctx).await,
                SphinxOperation::Browse => self.do_browse(ctx).await,
                SphinxOperation::Doctest => self.do_doctest(ctx).await,
                SphinxOperation::Tree => self.do_tree(ctx).await,
            }
        })
    }
}
