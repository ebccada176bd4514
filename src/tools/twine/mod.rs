// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package index client.
//!
//! ```text
//! Check   twine check <archives...>
//! Upload  twine upload [--repository <index>] <archives...> [<archive>.asc...]
//! ```
//!
//! A dry-run upload lists what would be published instead of uploading.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TwineOperation {
    #[default]
    Check,
    Upload,
}

#[derive(Debug, Clone)]
pub struct TwineTool {
    archives: Vec<PathBuf>,
    index: Option<String>,
    signatures: bool,
    operation: TwineOperation,
}

impl TwineTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            archives: Vec::new(),
            index: None,
            signatures: false,
            operation: TwineOperation::Check,
        }
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

    /// Named repository from `.pypirc`.
    #[must_use]
    pub fn index(mut self, index: Option<impl Into<String>>) -> Self {
        self.index = index.map(Into::into);
        self
    }

    /// Upload `<archive>.asc` signatures alongside each archive.
    #[must_use]
    pub const fn signatures(mut self, signatures: bool) -> Self {
        self.signatures = signatures;
        self
    }

    #[must_use]
    pub const fn check_op(mut self) -> Self {
        self.operation = TwineOperation::Check;
        self
    }

    #[must_use]
    pub const fn upload_op(mut self) -> Self {
        self.operation = TwineOperation::Upload;
        self
    }

    /// Files an upload would send.
    #[must_use]
    pub fn upload_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.archives.clone();
        if self.signatures {
            paths.extend(self.archives.iter().map(|a| signature_path(a)));
        }
        paths
    }

    #[must_use]
    pub fn check_command(&self, ctx: &ToolContext) -> ProcessBuilder {
        ProcessBuilder::new(&ctx.config().tools.twine)
            .arg("check")
            .args(&self.archives)
    }

    #[must_use]
    pub fn upload_command(&self, ctx: &ToolContext) -> ProcessBuilder {
        let mut builder = ProcessBuilder::new(&ctx.config().tools.twine).arg("upload");
        if let Some(ref index) = self.index {
            builder = builder.arg("--repository").arg(index);
        }
        builder.args(self.upload_paths())
    }

    async fn do_check(&self, ctx: &ToolContext) -> Result<()> {
        if self.archives.is_empty() {
            anyhow::bail!("No archives to check");
        }
        // Checking is read-only, so it runs during dry runs too.
        execute(
            &ctx.with_dry_run(false),
            self.check_command(ctx),
            "check archives",
        )
        .await?;
        Ok(())
    }

    async fn do_upload(&self, ctx: &ToolContext) -> Result<()> {
        if self.archives.is_empty() {
            anyhow::bail!("No archives to upload");
        }

        let builder = self.upload_command(ctx);
        if ctx.is_dry_run() {
            info!(cmd = %builder.command_line(), "[dry-run] Would publish via");
            for path in self.upload_paths() {
                let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                info!(file = %path.display(), size, "[dry-run] Would publish file");
            }
            return Ok(());
        }

        execute(ctx, builder, "upload archives")
            .await
            .context("Upload failed")?;
        info!(count = self.archives.len(), "Archives uploaded");
        Ok(())
    }
}

/// Detached signature written next to `archive`.
#[must_use]
pub fn signature_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(".asc");
    PathBuf::from(name)
}

impl Default for TwineTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TwineTool {
    fn name(&self) -> &'static str {
        "twine"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                TwineOperation::Check => self.do_check(ctx).await,
                TwineOperation::Upload => self.do_upload(ctx).await,
            }
        })
    }
}
