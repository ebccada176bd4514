// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Packaging steps of a release.
//!
//! ```text
//! publish --> [setup.py check] --> ScratchDir
//!               --> build (+ alt-python wheel)
//!               --> twine check --> test_install --> upload
//! upload  --> [gpg sign] --> twine upload
//! ```
//!
//! `publish` builds, checks and test-installs for real even when
//! dry-running; only the upload is skipped, and the build directory is kept
//! for inspection.

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use crate::config::Config;
use crate::config::merge::{EffectivePackaging, PackagingOverride, merge_packaging};
use crate::error::Result;
use crate::tools::git::GitTool;
use crate::tools::gpg::GpgTool;
use crate::tools::pip::PipTool;
use crate::tools::setup::{SetupTool, get_archives};
use crate::tools::twine::TwineTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::console::password;
use crate::utility::environment::in_ci;
use crate::utility::fs::scratch::ScratchDir;

const PASSPHRASE_PROMPT: &str = "Please enter GPG passphrase for signing: ";

/// `[packaging]` with command-line overrides applied.
#[must_use]
pub fn effective_packaging(config: &Config, over: &PackagingOverride) -> EffectivePackaging {
    merge_packaging(&config.packaging, &config.tools.python, over)
}

/// Builds sdist and/or wheel archives into `<directory>/dist`.
///
/// # Errors
///
/// Returns an error if nothing is selected or `setup.py` fails.
pub async fn build(
    ctx: &ToolContext,
    settings: &EffectivePackaging,
    directory: Option<&Path>,
) -> Result<()> {
    let mut tool = SetupTool::new()
        .sdist(settings.sdist)
        .wheel(settings.wheel)
        .clean(settings.clean)
        .python(&settings.python);
    if let Some(directory) = directory {
        tool = tool.directory(directory);
    }
    tool.run(ctx).await
}

/// Builds, verifies and uploads a release.
///
/// # Errors
///
/// Returns an error if any step fails.
pub async fn publish(ctx: &ToolContext, settings: &EffectivePackaging) -> Result<()> {
    let live = ctx.with_dry_run(false);

    if settings.check_desc {
        SetupTool::new()
            .python(&settings.python)
            .check_op()
            .run(&live)
            .await?;
    }

    let scratch = ScratchDir::new(settings.directory.as_deref(), ctx.is_dry_run())
        .context("Failed to create build directory")?;
    let directory = scratch.path();

    build(&live, settings, Some(directory)).await?;
    if settings.dual_wheels {
        SetupTool::new()
            .sdist(false)
            .wheel(true)
            .directory(directory)
            .python(&settings.alt_python)
            .run(&live)
            .await?;
    }

    TwineTool::new()
        .archives(get_archives(directory)?)
        .check_op()
        .run(&live)
        .await?;
    test_install(&live, directory).await?;
    upload(ctx, directory, settings.index.as_deref(), settings.sign).await?;

    if scratch.is_kept() {
        info!(directory = %directory.display(), "Build artifacts kept");
    }
    Ok(())
}

/// Optionally signs, then uploads, the archives in `<directory>/dist`.
///
/// # Errors
///
/// Returns an error if there is nothing to upload, gpg is missing when
/// signing, or twine fails.
pub async fn upload(
    ctx: &ToolContext,
    directory: &Path,
    index: Option<&str>,
    sign: bool,
) -> Result<()> {
    let archives = get_archives(directory)?;
    let dry_run = ctx.is_dry_run();

    if sign {
        let passphrase = if dry_run {
            String::new()
        } else {
            password(PASSPHRASE_PROMPT).context("Failed to read GPG passphrase")?
        };
        GpgTool::new()
            .archives(&archives)
            .passphrase(passphrase)
            .run(ctx)
            .await?;
    }

    TwineTool::new()
        .archives(&archives)
        .index(index)
        .signatures(sign && !dry_run)
        .upload_op()
        .run(ctx)
        .await
}

/// Python-2-only wheels can't be installed into a modern virtualenv.
fn is_py2_only(archive: &Path) -> bool {
    let name = archive
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    name.contains("py2") && !name.contains("py3")
}

/// Installs each archive in `<directory>/dist` into a fresh virtualenv.
///
/// # Errors
///
/// Returns an error if a virtualenv cannot be created or an archive fails
/// to install.
pub async fn test_install(ctx: &ToolContext, directory: &Path) -> Result<()> {
    let pip_version = ctx.config().packaging.pip_version.clone();

    for archive in get_archives(directory)? {
        if is_py2_only(&archive) {
            debug!(archive = %archive.display(), "Skipping Python 2 only wheel");
            continue;
        }

        let venv = ScratchDir::new(None, false).context("Failed to create virtualenv directory")?;
        PipTool::new().dest(venv.path()).venv_op().run(ctx).await?;
        PipTool::new()
            .venv(venv.path())
            .pin_pip(pip_version.as_deref())
            .requirement(archive.to_string_lossy())
            .install_op()
            .run(ctx)
            .await?;
    }
    Ok(())
}

/// Pushes commits and tags from `root`.
///
/// # Errors
///
/// Returns an error if `git push` fails.
pub async fn push(ctx: &ToolContext, root: &Path) -> Result<()> {
    GitTool::new().path(root).ci(in_ci()).push_op().run(ctx).await
}
