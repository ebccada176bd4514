// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version file discovery.
//!
//! ```text
//! packaging.package set?  --> that package
//! otherwise               --> the single top-level dir with __init__.py
//!                             (tests/, integration/, sites/, vendor/ excluded)
//!
//! <package>/<version_module>.py  --version_pattern-->  "1.2.3"
//!                                 --__version_info__ = (1, 2, 3)-->  "1.2.3"
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// `__version_info__ = (X, Y, Z)`, for modules that derive `__version__`
/// from the tuple.
static VERSION_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__version_info__\s*=\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)")
        .expect("version info pattern compiles")
});

/// Top-level directories never treated as the project package.
pub const EXCLUDED_DIRS: [&str; 4] = ["tests", "integration", "sites", "vendor"];

/// Finds the project's main package under `root`.
///
/// # Errors
///
/// Returns an error if no package, or more than one, is found.
pub fn find_package(root: &Path, configured: Option<&str>) -> Result<String> {
    if let Some(package) = configured.filter(|p| !p.is_empty()) {
        return Ok(package.to_string());
    }

    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to read directory {}", root.display()))?;

    let mut packages: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().join("__init__.py").is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !EXCLUDED_DIRS.contains(&name.as_str()))
        .collect();
    packages.sort();

    match packages.len() {
        0 => anyhow::bail!("Unable to find a local Python package!"),
        1 => Ok(packages.remove(0)),
        _ => anyhow::bail!("Found multiple Python packages: {packages:?}"),
    }
}

/// Path of the module holding `__version__`.
#[must_use]
pub fn version_file(root: &Path, package: &str, version_module: &str) -> PathBuf {
    root.join(package).join(format!("{version_module}.py"))
}

/// Reads the version string out of a version module.
///
/// # Errors
///
/// Returns an error if the file cannot be read or `pattern` does not match.
pub fn load_version(path: &Path, pattern: &Regex) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let version = parse_version(&content, pattern)
        .with_context(|| format!("version string not found in {}", path.display()))?;
    debug!(path = %path.display(), version = %version, "loaded version");
    Ok(version)
}

/// First capture group of `pattern` in `content`, else the
/// `__version_info__` tuple joined with dots.
#[must_use]
pub fn parse_version(content: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .or_else(|| {
            let caps = VERSION_INFO.captures(content)?;
            Some(format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]))
        })
}
