// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hands a file to the user's editor, attached to the terminal.
//!
//! The editor comes from `tools.editor`, then `$EDITOR`, then `vi`. It may
//! carry arguments, e.g. `code --wait`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;
use crate::utility::shell::split_words;

/// Used when neither config nor environment names an editor.
pub const FALLBACK_EDITOR: &str = "vi";

/// Picks the editor command line.
#[must_use]
pub fn resolve_editor(configured: Option<&str>, env: Option<String>) -> String {
    configured
        .map(str::to_string)
        .or(env)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

#[derive(Debug, Clone)]
pub struct EditorTool {
    file: Option<PathBuf>,
    editor: Option<String>,
}

impl EditorTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            file: None,
            editor: None,
        }
    }

    #[must_use]
    pub fn file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Overrides editor resolution.
    #[must_use]
    pub fn editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    /// # Errors
    ///
    /// Returns an error if no file was given or the editor command line has
    /// unbalanced quotes.
    pub fn command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let file = self.file.as_ref().context("EditorTool: file is required")?;
        let editor = self.editor.clone().unwrap_or_else(|| {
            resolve_editor(
                ctx.config().tools.editor.as_deref(),
                std::env::var("EDITOR").ok(),
            )
        });

        let mut parts = split_words(&editor)?.into_iter();
        let program = parts
            .next()
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
        Ok(ProcessBuilder::new(program)
            .args(parts)
            .arg(file)
            .interactive())
    }
}

impl Default for EditorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for EditorTool {
    fn name(&self) -> &'static str {
        "editor"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            execute(ctx, self.command(ctx)?, "edit").await?;
            Ok(())
        })
    }
}
