// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Opens a file with the desktop's default application (`tools.open`).

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;

#[derive(Debug, Clone, Default)]
pub struct OpenTool {
    path: Option<PathBuf>,
}

impl OpenTool {
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// # Errors
    ///
    /// Returns an error if no path was set.
    pub fn command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let path = self.path.as_ref().context("OpenTool: path is required")?;
        Ok(ProcessBuilder::new(&ctx.config().tools.open).arg(path))
    }
}

impl Tool for OpenTool {
    fn name(&self) -> &'static str {
        "open"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            execute(ctx, self.command(ctx)?, "open file").await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::OpenTool;
    use crate::tools::Tool;
    use crate::tools::test_utils::{context, run_with_logs};

    #[test]
    fn test_open_requires_path() {
        let err = OpenTool::new().command(&context(false)).unwrap_err();
        assert_eq!(err.to_string(), "OpenTool: path is required");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_open_dry_run() -> anyhow::Result<()> {
        let logs = run_with_logs(|| async {
            OpenTool::new()
                .path("htmlcov/index.html")
                .run(&context(true))
                .await
        })
        .await?;

        assert!(logs.contains("[dry-run] Would open file"), "{logs}");
        assert!(logs.contains("open htmlcov/index.html"), "{logs}");
        Ok(())
    }
}
