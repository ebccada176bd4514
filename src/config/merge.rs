// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration merging.
//!
//! ```text
//! SphinxConfig    + SphinxConfigOverride    --> per-site docs config
//! PackagingConfig + PackagingOverride (CLI) --> effective packaging config
//! ```
//!
//! Only explicitly set fields (`Some`) in override replace base values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::types::{PackagingConfig, SphinxConfig};

/// Sphinx configuration with optional fields for field-level merging.
///
/// Used for `[sites.<name>]` tables where only explicitly set fields
/// should override the site's default layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SphinxConfigOverride {
    /// Documentation source directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Build output directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    /// File opened by `browse`, relative to `target`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file: Option<String>,
}

/// Merge a site override over a base Sphinx config.
pub(super) fn merge_sphinx_config(
    base: &SphinxConfig,
    override_config: &SphinxConfigOverride,
) -> SphinxConfig {
    SphinxConfig {
        source: override_config
            .source
            .clone()
            .unwrap_or_else(|| base.source.clone()),
        target: override_config
            .target
            .clone()
            .unwrap_or_else(|| base.target.clone()),
        target_file: override_config
            .target_file
            .clone()
            .unwrap_or_else(|| base.target_file.clone()),
    }
}

/// Packaging settings given on the command line.
///
/// `None` means "not given", so the `[packaging]` value applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagingOverride {
    pub sdist: Option<bool>,
    pub wheel: Option<bool>,
    pub clean: Option<bool>,
    pub directory: Option<PathBuf>,
    pub python: Option<PathBuf>,
    pub index: Option<String>,
    pub sign: Option<bool>,
    pub dual_wheels: Option<bool>,
    pub alt_python: Option<String>,
    pub check_desc: Option<bool>,
}

/// Packaging settings after applying command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePackaging {
    pub sdist: bool,
    pub wheel: bool,
    pub clean: bool,
    pub directory: Option<PathBuf>,
    pub python: PathBuf,
    pub index: Option<String>,
    pub sign: bool,
    pub dual_wheels: bool,
    pub alt_python: String,
    pub check_desc: bool,
}

/// Merge command-line packaging options over `[packaging]` and `[tools]`.
#[must_use]
pub fn merge_packaging(
    base: &PackagingConfig,
    python: &std::path::Path,
    override_config: &PackagingOverride,
) -> EffectivePackaging {
    EffectivePackaging {
        sdist: override_config.sdist.unwrap_or(base.sdist),
        wheel: override_config.wheel.unwrap_or(base.wheel),
        clean: override_config.clean.unwrap_or(base.clean),
        directory: override_config
            .directory
            .clone()
            .or_else(|| base.directory.clone()),
        python: override_config
            .python
            .clone()
            .unwrap_or_else(|| python.to_path_buf()),
        index: override_config.index.clone().or_else(|| base.index.clone()),
        sign: override_config.sign.unwrap_or(base.sign),
        dual_wheels: override_config.dual_wheels.unwrap_or(base.dual_wheels),
        alt_python: override_config
            .alt_python
            .clone()
            .unwrap_or_else(|| base.alt_python.clone()),
        check_desc: override_config.check_desc.unwrap_or(base.check_desc),
    }
}
