// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for chores-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local chores.toml (cwd)
//! 3. --ini files (in order)
//! 4. CHORES_* env vars
//! 5. -s section.key=value overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! CHORES_GLOBAL__DRY=true               → global.dry = true
//! CHORES_PACKAGING__SIGN=true           → packaging.sign = true
//! CHORES_PACKAGING__CHANGELOG_FILE=x    → packaging.changelog_file = "x"
//! ```
//!
//! # Documentation Sites
//!
//! ```toml
//! [sphinx]
//! source = "docs"
//!
//! [sites.www]
//! target = "public" # sites/www is the source, public/ the output
//! ```

pub mod loader;
pub mod merge;
pub mod types;


use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use merge::SphinxConfigOverride;
use types::{
    BlackenConfig, CiConfig, GlobalConfig, PackagingConfig, SphinxConfig, TestsConfig,
    ToolsConfig,
};

/// Sites every project gets without declaring them.
pub const DEFAULT_SITES: [&str; 2] = ["docs", "www"];

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// External program names.
    pub tools: ToolsConfig,
    /// Packaging and release settings.
    pub packaging: PackagingConfig,
    /// Single-site Sphinx settings.
    pub sphinx: SphinxConfig,
    /// Per-site overrides of the `sites/<name>` layout (field-level merging).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sites: BTreeMap<String, SphinxConfigOverride>,
    /// Formatter settings.
    pub blacken: BlackenConfig,
    /// Test-suite settings.
    pub tests: TestsConfig,
    /// CI host settings.
    pub ci: CiConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chores_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("ci/chores.toml")
    ///     .add_toml_file_optional("chores.toml")
    ///     .with_env_prefix("CHORES")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Get the Sphinx configuration for a named site.
    ///
    /// Resolution order:
    /// 1. `[sites.<name>]` fields, when present
    /// 2. the `sites/<name>` default layout
    #[must_use]
    pub fn site_config(&self, name: &str) -> SphinxConfig {
        let base = SphinxConfig::for_site(name);
        self.sites
            .get(name)
            .map_or_else(|| base.clone(), |site| merge::merge_sphinx_config(&base, site))
    }

    /// Names of all known sites: the defaults plus any `[sites.*]` tables.
    #[must_use]
    pub fn site_names(&self) -> BTreeSet<String> {
        DEFAULT_SITES
            .iter()
            .map(|s| (*s).to_string())
            .chain(self.sites.keys().cloned())
            .collect()
    }

    /// Package whose sources trigger API doc rebuilds.
    #[must_use]
    pub fn watched_package(&self) -> Option<&str> {
        self.packaging
            .package
            .as_deref()
            .or(self.tests.package.as_deref())
    }

    /// Compiled `packaging.version_pattern`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the pattern does not compile
    /// or has no capture group.
    pub fn version_regex(&self) -> std::result::Result<Regex, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            section: "packaging".to_string(),
            key: "version_pattern".to_string(),
            message,
        };
        let regex = Regex::new(&self.packaging.version_pattern)
            .map_err(|e| invalid(e.to_string()))?;
        if regex.captures_len() < 2 {
            return Err(invalid("pattern needs a capture group".to_string()));
        }
        Ok(regex)
    }

    /// Validate cross-field constraints after deserialization.
    ///
    /// # Errors
    ///
    /// Returns an error if the version pattern is unusable or the formatter
    /// line length is zero.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.version_regex()?;
        if self.blacken.line_length == 0 {
            return Err(ConfigError::InvalidValue {
                section: "blacken".to_string(),
                key: "line_length".to_string(),
                message: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.blacken.folders.is_empty() {
            self.blacken.folders = BlackenConfig::default().folders;
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields (the CI sudo password) are hidden with a `[hidden]`
    /// marker. Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_packaging_options(&mut options);
        self.format_docs_options(&mut options);
        self.format_misc_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.assume_yes".into(),
            self.global.assume_yes.to_string(),
        );
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.log_json".into(), self.global.log_json.to_string());
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        let tools = &self.tools;
        for (name, path) in [
            ("python", &tools.python),
            ("black", &tools.black),
            ("pytest", &tools.pytest),
            ("sphinx_build", &tools.sphinx_build),
            ("twine", &tools.twine),
            ("pip", &tools.pip),
            ("git", &tools.git),
            ("tree", &tools.tree),
            ("open", &tools.open),
            ("sudo", &tools.sudo),
            ("ssh_keygen", &tools.ssh_keygen),
            ("tar", &tools.tar),
            ("unzip", &tools.unzip),
        ] {
            options.insert(format!("tools.{name}"), path.display().to_string());
        }
        if let Some(ref editor) = tools.editor {
            options.insert("tools.editor".into(), editor.clone());
        }
    }

    fn format_packaging_options(&self, options: &mut BTreeMap<String, String>) {
        let p = &self.packaging;
        if let Some(ref package) = p.package {
            options.insert("packaging.package".into(), package.clone());
        }
        options.insert(
            "packaging.changelog_file".into(),
            p.changelog_file.display().to_string(),
        );
        options.insert("packaging.version_module".into(), p.version_module.clone());
        options.insert(
            "packaging.version_pattern".into(),
            p.version_pattern.clone(),
        );
        options.insert("packaging.sdist".into(), p.sdist.to_string());
        options.insert("packaging.wheel".into(), p.wheel.to_string());
        options.insert("packaging.clean".into(), p.clean.to_string());
        if let Some(ref directory) = p.directory {
            options.insert(
                "packaging.directory".into(),
                directory.display().to_string(),
            );
        }
        if let Some(ref index) = p.index {
            options.insert("packaging.index".into(), index.clone());
        }
        options.insert("packaging.sign".into(), p.sign.to_string());
        options.insert("packaging.dual_wheels".into(), p.dual_wheels.to_string());
        options.insert("packaging.alt_python".into(), p.alt_python.clone());
        options.insert("packaging.check_desc".into(), p.check_desc.to_string());
        if let Some(ref pip_version) = p.pip_version {
            options.insert("packaging.pip_version".into(), pip_version.clone());
        }
    }

    fn format_docs_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "sphinx.source".into(),
            self.sphinx.source.display().to_string(),
        );
        options.insert(
            "sphinx.target".into(),
            self.sphinx.target.display().to_string(),
        );
        options.insert("sphinx.target_file".into(), self.sphinx.target_file.clone());
        for name in self.site_names() {
            let site = self.site_config(&name);
            options.insert(
                format!("sites.{name}.source"),
                site.source.display().to_string(),
            );
            options.insert(
                format!("sites.{name}.target"),
                site.target.display().to_string(),
            );
        }
    }

    fn format_misc_options(&self, options: &mut BTreeMap<String, String>) {
        let folders: Vec<String> = self
            .blacken
            .folders
            .iter()
            .map(|f| f.display().to_string())
            .collect();
        options.insert("blacken.folders".into(), folders.join(", "));
        options.insert(
            "blacken.line_length".into(),
            self.blacken.line_length.to_string(),
        );
        if let Some(ref package) = self.tests.package {
            options.insert("tests.package".into(), package.clone());
        }
        options.insert("ci.sudo.user".into(), self.ci.sudo.user.clone());
        options.insert("ci.sudo.group".into(), self.ci.sudo.group.clone());
        if !self.ci.sudo.password.is_empty() {
            options.insert("ci.sudo.password".into(), "[hidden]".into());
        }
    }
}
