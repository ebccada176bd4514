// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

/// A working directory for one chore.
///
/// Either a fresh temp directory removed on drop, or a directory that is
/// left in place afterwards: an explicit path, or a temp directory the
/// caller asked to keep for inspection (e.g. dry-run builds).
#[derive(Debug)]
pub enum ScratchDir {
    Temporary(TempDir),
    Kept(PathBuf),
}

impl ScratchDir {
    /// Creates the scratch directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(explicit: Option<&Path>, skip_cleanup: bool) -> io::Result<Self> {
        if let Some(path) = explicit {
            std::fs::create_dir_all(path)?;
            return Ok(Self::Kept(path.to_path_buf()));
        }
        let temp = tempfile::Builder::new().prefix("chores-").tempdir()?;
        if skip_cleanup {
            let path = temp.keep();
            debug!(path = %path.display(), "keeping scratch directory");
            return Ok(Self::Kept(path));
        }
        Ok(Self::Temporary(temp))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Temporary(temp) => temp.path(),
            Self::Kept(path) => path,
        }
    }

    /// Whether the directory survives this value being dropped.
    #[must_use]
    pub const fn is_kept(&self) -> bool {
        matches!(self, Self::Kept(_))
    }
}
