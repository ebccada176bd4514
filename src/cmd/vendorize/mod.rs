// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Vendorize command: copy a third-party package into the project.
//!
//! ```text
//! index:  pip download DIST==VERSION --> extract --> <scratch>/<archive stem>/
//! git:    git clone URL --> checkout VERSION   --> <scratch>/<DIST>/
//!                                  |
//!                  <source>/<PACKAGE> --> <VENDOR_DIR>/<PACKAGE> (+ license)
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::info;

use crate::cli::chores::VendorizeArgs;
use crate::cmd::{project_root, tool_context};
use crate::config::Config;
use crate::error::Result;
use crate::tools::extractor::{ArchiveFormat, ExtractorTool};
use crate::tools::git::GitTool;
use crate::tools::pip::PipTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::copy::copy_dir_contents_async;
use crate::utility::fs::scratch::ScratchDir;

/// Main handler for the vendorize command.
///
/// # Errors
///
/// Returns an error if fetching, unpacking or copying fails.
pub async fn run_vendorize_command(args: &VendorizeArgs, config: &Config) -> Result<()> {
    vendorize(&tool_context(config), &project_root()?, args).await
}

/// The downloaded source archive in `dir`.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read or holds no known archive.
pub fn find_source_archive(dir: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut archives: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && ArchiveFormat::from_extension(path).is_some())
        .collect();
    archives.sort();

    archives
        .into_iter()
        .next()
        .with_context(|| format!("No source archive was downloaded into {}", dir.display()))
}

/// Folder an sdist unpacks into, e.g. `lexicon-2.0.1` for
/// `lexicon-2.0.1.tar.gz`.
#[must_use]
pub fn unpacked_name(archive: &Path) -> Option<String> {
    let format = ArchiveFormat::from_extension(archive)?;
    let filename = archive.file_name()?.to_str()?;
    Some(format.stem(filename).to_string())
}

/// Fetches the source into `scratch` and returns its root.
async fn unpack(ctx: &ToolContext, scratch: &Path, args: &VendorizeArgs) -> Result<PathBuf> {
    if let Some(ref url) = args.git_url {
        let checkout = scratch.join(&args.distribution);
        GitTool::new()
            .url(url)
            .path(&checkout)
            .clone_op()
            .run(ctx)
            .await?;
        GitTool::new()
            .path(&checkout)
            .target(&args.version)
            .checkout_op()
            .run(ctx)
            .await?;
        return Ok(checkout);
    }

    PipTool::new()
        .requirement(format!("{}=={}", args.distribution, args.version))
        .dest(scratch)
        .download_op()
        .run(ctx)
        .await?;
    if ctx.is_dry_run() {
        return Ok(scratch.join(format!("{}-{}", args.distribution, args.version)));
    }

    let archive = find_source_archive(scratch)?;
    ExtractorTool::new()
        .archive(&archive)
        .output(scratch)
        .run(ctx)
        .await?;
    let name = unpacked_name(&archive)
        .with_context(|| format!("Don't know how to unpack {}", archive.display()))?;
    Ok(scratch.join(name))
}

/// Replaces `<root>/<vendor_dir>/<package>` with the package from the
/// requested release or git ref.
///
/// # Errors
///
/// Returns an error if the source can't be fetched, the package isn't in
/// it, or copying fails.
pub async fn vendorize(ctx: &ToolContext, root: &Path, args: &VendorizeArgs) -> Result<()> {
    let package = args.package.as_deref().unwrap_or(&args.distribution);
    let target = root.join(&args.vendor_dir).join(package);

    let scratch = ScratchDir::new(None, false).context("Failed to create scratch directory")?;
    let source = unpack(ctx, scratch.path(), args).await?;
    let source_package = source.join(package);

    if ctx.is_dry_run() {
        info!(
            source = %source_package.display(),
            target = %target.display(),
            "[dry-run] Would replace vendorized folder"
        );
        return Ok(());
    }

    if !source_package.exists() {
        let shown = source_package
            .strip_prefix(scratch.path())
            .unwrap_or(&source_package);
        anyhow::bail!("Source package {} doesn't exist!", shown.display());
    }

    if target.exists() {
        info!(target = %target.display(), "Removing pre-existing vendorized folder");
        fs::remove_dir_all(&target)
            .await
            .with_context(|| format!("Failed to remove {}", target.display()))?;
    }

    info!(
        source = %source_package.display(),
        target = %target.display(),
        "Copying"
    );
    copy_dir_contents_async(&source_package, &target).await?;

    if let Some(ref license) = args.license {
        let from = source.join(license);
        let name = license
            .file_name()
            .with_context(|| format!("Invalid license path {}", license.display()))?;
        fs::copy(&from, target.join(name))
            .await
            .with_context(|| format!("Failed to copy license {}", from.display()))?;
    }

    info!(package, version = %args.version, "Vendorized");
    Ok(())
}

#[cfg(test)]
mod tests;
