// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::unbounded;
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::warn;

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
    /// Skip files whose names end with one of these suffixes
    #[builder(setters(name = with_skip_suffixes), default)]
    skip_suffixes: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    #[must_use]
    pub fn skip_suffixes(&self) -> &[String] {
        &self.skip_suffixes
    }

    /// Options for scanning a Python project's sources.
    ///
    /// - Ignores hidden files
    /// - Respects .gitignore
    /// - Skips VCS metadata, caches, virtualenvs and build output
    #[must_use]
    pub fn for_python_project() -> Self {
        Self::builder()
            .with_skip_dirs(
                [
                    ".git", ".hg", "__pycache__", ".tox", "venv", ".venv", "build", "dist",
                ]
                .map(String::from)
                .to_vec(),
            )
            .build()
    }

    /// Options for watching a documentation tree for edits.
    ///
    /// Skips Sphinx output directories and editor swap files so a rebuild
    /// never retriggers itself.
    #[must_use]
    pub fn for_docs_watch() -> Self {
        Self::builder()
            .with_respect_gitignore(false)
            .with_skip_dirs(["_build", ".git", "__pycache__"].map(String::from).to_vec())
            .with_skip_suffixes([".swp", ".pyc"].map(String::from).to_vec())
            .build()
    }

    fn skips_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.skip_suffixes.iter().any(|s| name.ends_with(s.as_str())))
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    // Honour .gitignore outside of a checkout too (fresh sdists, temp dirs)
    builder.require_git(false);

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && entry.depth() > 0
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Finds files matching a glob pattern using parallel traversal.
///
/// Uses the `wax` crate for glob matching combined with
/// `ignore::WalkParallel`. Patterns are matched against paths relative to
/// `root`. Results are sorted so command lines built from them are stable.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use chores_rs::utility::fs::walk::{WalkOptions, find_files};
///
/// let sources = find_files("src", "**/*.py", &WalkOptions::for_python_project())?;
/// for file in sources {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    // Unbounded: the parallel walk only returns once every sender is done
    let (tx, rx) = unbounded::<PathBuf>();
    let glob = Arc::new(glob);
    let root_path = root.to_path_buf();

    let parallel = build_walker(root, options).build_parallel();

    parallel.run(|| {
        let tx = tx.clone();
        let glob = Arc::clone(&glob);
        let root_path = root_path.clone();

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && let Ok(rel_path) = entry.path().strip_prefix(&root_path)
                        && glob.is_match(rel_path)
                    {
                        let _ = tx.send(entry.path().to_path_buf());
                    }
                }
                Err(e) => warn!(error = %e, "walk error"),
            }
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<PathBuf> = rx.iter().collect();
    files.sort();
    Ok(files)
}

/// Modification times of every file under a set of roots.
pub type Snapshot = BTreeMap<PathBuf, SystemTime>;

/// Records the modification time of every file under `roots`.
///
/// Missing roots are skipped. Two snapshots are compared with
/// [`changed_paths`] to detect edits, additions and removals.
#[must_use]
pub fn snapshot(roots: &[PathBuf], options: &WalkOptions) -> Snapshot {
    let (tx, rx) = unbounded::<(PathBuf, SystemTime)>();
    let options = Arc::new(options.clone());

    for root in roots.iter().filter(|r| r.exists()) {
        let parallel = build_walker(root, &options).build_parallel();
        parallel.run(|| {
            let tx = tx.clone();
            let options = Arc::clone(&options);

            Box::new(move |entry_result| {
                if let Ok(entry) = entry_result
                    && entry.file_type().is_some_and(|ft| ft.is_file())
                    && !options.skips_file(entry.path())
                    && let Ok(modified) = entry
                        .metadata()
                        .and_then(|m| m.modified().map_err(ignore::Error::Io))
                {
                    let _ = tx.send((entry.path().to_path_buf(), modified));
                }
                ignore::WalkState::Continue
            })
        });
    }

    drop(tx);
    rx.iter().collect()
}

/// Paths that differ between two snapshots, sorted.
#[must_use]
pub fn changed_paths(before: &Snapshot, after: &Snapshot) -> Vec<PathBuf> {
    let mut changed: Vec<PathBuf> = after
        .iter()
        .filter(|(path, modified)| before.get(*path) != Some(*modified))
        .map(|(path, _)| path.clone())
        .chain(
            before
                .keys()
                .filter(|path| !after.contains_key(*path))
                .cloned(),
        )
        .collect();
    changed.sort();
    changed
}
