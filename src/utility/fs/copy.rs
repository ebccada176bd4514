// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::Path;
use tokio::fs;

/// Recursively copies all contents from src directory to dst directory.
///
/// Creates dst if it doesn't exist. Bytecode caches are left behind.
///
/// # Example
/// ```no_run
/// use chores_rs::utility::fs::copy::copy_dir_contents_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_dir_contents_async(Path::new("/tmp/requests-2.0/requests"), Path::new("vendor/requests")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_dir_contents_async(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("failed to stat {}", src_path.display()))?;

        if entry.file_name() == "__pycache__" {
            continue;
        }

        if file_type.is_dir() {
            Box::pin(copy_dir_contents_async(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}
