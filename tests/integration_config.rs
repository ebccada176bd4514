// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::PathBuf;

use chores_rs::config::Config;
use chores_rs::config::loader::ConfigLoader;
use chores_rs::logging::LogLevel;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_project_file() {
    let toml = r#"
[global]
assume_yes = true
output_log_level = 4

[tools]
python = "python3.12"
editor = "nano -w"

[packaging]
package = "invocations"
changelog_file = "sites/www/changelog.rst"
sign = true
pip_version = "24.0"

[blacken]
folders = ["invocations", "tests"]
line_length = 88

[ci.sudo]
user = "runner"
"#;
    let config = Config::parse(toml).unwrap();

    assert!(config.global.assume_yes);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.tools.python, PathBuf::from("python3.12"));
    assert_eq!(config.tools.editor.as_deref(), Some("nano -w"));
    assert_eq!(config.packaging.package.as_deref(), Some("invocations"));
    assert_eq!(
        config.packaging.changelog_file,
        PathBuf::from("sites/www/changelog.rst")
    );
    assert!(config.packaging.sign);
    assert!(config.packaging.wheel);
    assert_eq!(config.blacken.line_length, 88);
    assert_eq!(config.ci.sudo.user, "runner");
    assert_eq!(config.ci.sudo.group, "sudo");
}

#[test]
fn config_parse_sites() {
    let toml = r#"
[sites.www]
target = "public"

[sites.api]
source = "api-docs"
"#;
    let config = Config::parse(toml).unwrap();

    let names: Vec<String> = config.site_names().into_iter().collect();
    assert_eq!(names, ["api", "docs", "www"]);
    assert_eq!(config.site_config("www").source, PathBuf::from("sites/www"));
    assert_eq!(config.site_config("www").target, PathBuf::from("public"));
    assert_eq!(config.site_config("api").source, PathBuf::from("api-docs"));
}

#[test]
fn config_parse_rejects_typo() {
    let err = Config::parse("[packaging]\nsing = true\n").unwrap_err();
    assert!(err.to_string().contains("sing"), "{err}");
}

// =============================================================================
// Loader layering
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("chores.toml");
    let extra = temp.path().join("ci.toml");
    std::fs::write(&base, "[packaging]\nindex = \"pypi\"\nsign = true\n").unwrap();
    std::fs::write(&extra, "[packaging]\nindex = \"testpypi\"\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&base)
        .add_toml_file(&extra);
    assert_eq!(loader.loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.packaging.index.as_deref(), Some("testpypi"));
    assert!(config.packaging.sign);
}

#[test]
fn config_set_overrides_files() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\ndry = false\n[tools]\npython = \"python3\"\n")
        .set_all(["global.dry=true", "tools.python = python3.13"])
        .unwrap()
        .build()
        .unwrap();

    assert!(config.global.dry);
    assert_eq!(config.tools.python, PathBuf::from("python3.13"));
}

#[test]
fn config_missing_required_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(temp.path().join("nope.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_missing_optional_file_is_skipped() {
    let temp = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new().add_toml_file_optional(temp.path().join("chores.toml"));

    assert!(loader.format_loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn config_options_listing() {
    let config = Config::parse("[packaging]\nindex = \"internal\"\n").unwrap();
    let options = config.format_options();

    assert!(options.iter().any(|line| line.starts_with("packaging.index") && line.ends_with("= internal")));
    assert!(options.iter().any(|line| line.starts_with("ci.sudo.password") && line.ends_with("[hidden]")));
}
