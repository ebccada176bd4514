// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Source archive extraction.
//!
//! ```text
//! .zip           --> unzip -q -o <archive> -d <output_dir>
//! .tar.gz | .tgz --> tar xzf <archive> -C <output_dir>
//! .tar           --> tar xf <archive> -C <output_dir>
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
    Tar,
}

impl ArchiveFormat {
    /// Detects archive format from file extension.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?;

        let ends_with_ci = |s: &str, suffix: &str| {
            s.len() >= suffix.len() && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
        };

        if ends_with_ci(filename, ".tar.gz") || ends_with_ci(filename, ".tgz") {
            return Some(Self::TarGz);
        }

        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("zip") {
            Some(Self::Zip)
        } else if ext.eq_ignore_ascii_case("tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }

    /// Strips the archive extension, leaving the unpacked folder's usual name.
    #[must_use]
    pub fn stem(self, filename: &str) -> &str {
        let suffix_len = match self {
            Self::Zip | Self::Tar => 4,
            Self::TarGz if filename.to_ascii_lowercase().ends_with(".tgz") => 4,
            Self::TarGz => 7,
        };
        filename
            .get(..filename.len().saturating_sub(suffix_len))
            .unwrap_or(filename)
    }
}

#[derive(Debug, Clone)]
pub struct ExtractorTool {
    archive: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: Option<ArchiveFormat>,
}

impl ExtractorTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            archive: None,
            output_dir: None,
            format: None,
        }
    }

    #[must_use]
    pub fn archive(mut self, path: impl AsRef<Path>) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Explicitly sets the archive format (auto-detection used if not specified).
    #[must_use]
    pub const fn format(mut self, format: ArchiveFormat) -> Self {
        self.format = Some(format);
        self
    }

    fn archive_required(&self) -> Result<&Path> {
        self.archive
            .as_deref()
            .context("ExtractorTool: archive path is required")
    }

    fn output_dir_required(&self) -> Result<&Path> {
        self.output_dir
            .as_deref()
            .context("ExtractorTool: output directory is required")
    }

    fn detect_format(&self) -> Result<ArchiveFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }

        let archive = self.archive_required()?;
        ArchiveFormat::from_extension(archive).with_context(|| {
            format!(
                "Don't know how to unpack {}. Supported: .zip, .tar.gz, .tgz, .tar",
                archive.display()
            )
        })
    }

    /// The unpacking invocation for the detected format.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive, output directory or format is unknown.
    pub fn command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let archive = self.archive_required()?;
        let output_dir = self.output_dir_required()?;
        let tools = &ctx.config().tools;

        let builder = match self.detect_format()? {
            ArchiveFormat::Zip => ProcessBuilder::new(&tools.unzip)
                .args(["-q", "-o"])
                .arg(archive)
                .arg("-d")
                .arg(output_dir),
            ArchiveFormat::TarGz => ProcessBuilder::new(&tools.tar)
                .arg("xzf")
                .arg(archive)
                .arg("-C")
                .arg(output_dir),
            ArchiveFormat::Tar => ProcessBuilder::new(&tools.tar)
                .arg("xf")
                .arg(archive)
                .arg("-C")
                .arg(output_dir),
        };
        Ok(builder)
    }

    async fn do_extract(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.command(ctx)?;
        let output_dir = self.output_dir_required()?;

        if !ctx.is_dry_run() && !output_dir.exists() {
            fs::create_dir_all(output_dir).await.with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    output_dir.display()
                )
            })?;
        }

        debug!(output = %output_dir.display(), "Extracting archive");
        if execute(ctx, builder, "extract archive").await?.is_some() {
            info!(
                archive = ?self.archive,
                output = %output_dir.display(),
                "Archive extracted"
            );
        }
        Ok(())
    }
}

impl Default for ExtractorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ExtractorTool {
    fn name(&self) -> &'static str {
        "extractor"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_extract(ctx))
    }
}
