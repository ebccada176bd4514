// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for chores-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ToolsConfig, PackagingConfig, SphinxConfig,
//!         BlackenConfig, TestsConfig, CiConfig
//! Sites: site name -> SphinxConfigOverride
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default pattern used to pull `__version__` out of the version module.
pub const DEFAULT_VERSION_PATTERN: &str = r#"__version__\s*=\s*["'](\d[^"']*)["']"#;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Log what would run without running it.
    pub dry: bool,
    /// Answer yes to every confirmation prompt.
    pub assume_yes: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub log_json: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            assume_yes: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            log_json: false,
        }
    }
}

/// External program names or paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Python interpreter used for `setup.py` and venvs.
    pub python: PathBuf,
    /// Code formatter.
    pub black: PathBuf,
    /// Test runner.
    pub pytest: PathBuf,
    /// Documentation builder.
    pub sphinx_build: PathBuf,
    /// Package checker/uploader.
    pub twine: PathBuf,
    /// Package installer, used to fetch source distributions.
    pub pip: PathBuf,
    /// Version control client.
    pub git: PathBuf,
    /// Directory tree printer.
    pub tree: PathBuf,
    /// Opens files in the desktop's default application.
    pub open: PathBuf,
    /// Editor for changelog and version edits; falls back to `$EDITOR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Privilege escalation.
    pub sudo: PathBuf,
    /// SSH key generator.
    pub ssh_keygen: PathBuf,
    /// Tarball extractor.
    pub tar: PathBuf,
    /// Zip extractor.
    pub unzip: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python"),
            black: PathBuf::from("black"),
            pytest: PathBuf::from("pytest"),
            sphinx_build: PathBuf::from("sphinx-build"),
            twine: PathBuf::from("twine"),
            pip: PathBuf::from("pip"),
            git: PathBuf::from("git"),
            tree: PathBuf::from("tree"),
            open: PathBuf::from("open"),
            editor: None,
            sudo: PathBuf::from("sudo"),
            ssh_keygen: PathBuf::from("ssh-keygen"),
            tar: PathBuf::from("tar"),
            unzip: PathBuf::from("unzip"),
        }
    }
}

/// Packaging and release settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingConfig {
    /// Python package name; discovered from the project root when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Changelog in `releases` reStructuredText format.
    pub changelog_file: PathBuf,
    /// Module (without `.py`) inside the package holding `__version__`.
    pub version_module: String,
    /// Regex with one capture group extracting the version string.
    pub version_pattern: String,
    /// Build source distributions.
    pub sdist: bool,
    /// Build wheels.
    pub wheel: bool,
    /// Remove `dist/` and `build/` before building.
    pub clean: bool,
    /// Base directory for `dist/` and `build/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Upload repository name passed to twine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// GPG-sign archives before upload.
    pub sign: bool,
    /// Build an extra wheel with the alternate interpreter.
    pub dual_wheels: bool,
    /// Alternate interpreter for dual wheels.
    pub alt_python: String,
    /// Run `setup.py check -r -s` before publishing.
    pub check_desc: bool,
    /// pip version pinned inside test-install virtualenvs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pip_version: Option<String>,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            package: None,
            changelog_file: PathBuf::from("docs/changelog.rst"),
            version_module: "_version".to_string(),
            version_pattern: DEFAULT_VERSION_PATTERN.to_string(),
            sdist: true,
            wheel: true,
            clean: false,
            directory: None,
            index: None,
            sign: false,
            dual_wheels: false,
            alt_python: "python2".to_string(),
            check_desc: false,
            pip_version: None,
        }
    }
}

/// Sphinx documentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SphinxConfig {
    /// Documentation source directory.
    pub source: PathBuf,
    /// Build output directory.
    pub target: PathBuf,
    /// File opened by `browse`, relative to `target`.
    pub target_file: String,
}

impl Default for SphinxConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("docs"),
            target: PathBuf::from("docs/_build"),
            target_file: "index.html".to_string(),
        }
    }
}

impl SphinxConfig {
    /// Default layout of a named site under `sites/`.
    #[must_use]
    pub fn for_site(name: &str) -> Self {
        let source = PathBuf::from("sites").join(name);
        Self {
            target: source.join("_build"),
            source,
            target_file: "index.html".to_string(),
        }
    }

    /// Path of the file `browse` opens.
    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        self.target.join(&self.target_file)
    }
}

/// Formatter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlackenConfig {
    /// Folders searched for `*.py` files.
    pub folders: Vec<PathBuf>,
    /// Maximum line length.
    pub line_length: u16,
}

impl Default for BlackenConfig {
    fn default() -> Self {
        Self {
            folders: vec![PathBuf::from(".")],
            line_length: 79,
        }
    }
}

/// Test-suite settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestsConfig {
    /// Package watched for doc rebuilds when `packaging.package` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

/// CI host settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CiConfig {
    /// Sudo-capable user created on CI hosts.
    pub sudo: SudoConfig,
}

/// Sudo user created by `ci make-sudouser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SudoConfig {
    /// Login name.
    pub user: String,
    /// Password set through `chpasswd`.
    pub password: String,
    /// Supplementary group granting sudo.
    pub group: String,
}

impl Default for SudoConfig {
    fn default() -> Self {
        Self {
            user: "invoker".to_string(),
            password: "secret".to_string(),
            group: "sudo".to_string(),
        }
    }
}
