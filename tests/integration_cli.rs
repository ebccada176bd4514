// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use std::path::PathBuf;

use chores_rs::cli::chores::CiCommand;
use chores_rs::cli::docs::DocsCommand;
use chores_rs::cli::release::ReleaseCommand;
use chores_rs::cli::{Cli, Command};
use clap::Parser;

// =============================================================================
// Top-level Commands
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["chores", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_options_and_inis() {
    let cli = Cli::try_parse_from(["chores", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));

    let cli = Cli::try_parse_from(["chores", "--no-default-inis", "-i", "a.toml", "inis"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Inis)));
    assert!(cli.global.no_default_inis);
    assert_eq!(cli.global.inis, [PathBuf::from("a.toml")]);
}

#[test]
fn cli_unknown_command_is_rejected() {
    let err = Cli::try_parse_from(["chores", "deploy"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_repeated_ini_and_set() {
    let cli = Cli::try_parse_from([
        "chores",
        "--ini",
        "base.toml",
        "--ini",
        "ci.toml",
        "-s",
        "tools.python=python3.12",
        "--set",
        "packaging.index=testpypi",
        "test",
    ])
    .unwrap();

    assert_eq!(
        cli.global.inis,
        [PathBuf::from("base.toml"), PathBuf::from("ci.toml")]
    );
    assert_eq!(
        cli.global.to_config_overrides(),
        ["tools.python=python3.12", "packaging.index=testpypi"]
    );
}

#[test]
fn cli_file_log_level_overrides_log_level() {
    let cli = Cli::try_parse_from([
        "chores",
        "-l",
        "2",
        "--file-log-level",
        "5",
        "--log-file",
        "chores.log",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.to_config_overrides(),
        [
            "global.output_log_level=2",
            "global.file_log_level=5",
            "global.log_file=chores.log",
        ]
    );
}

#[test]
fn cli_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["chores", "-l", "7", "options"]).is_err());
}

// =============================================================================
// Release Command
// =============================================================================

#[test]
fn cli_release_subcommands() {
    let parse = |args: &[&str]| {
        let mut argv = vec!["chores", "release"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Command::Release(release)) => release.command,
            other => panic!("expected release, got {other:?}"),
        }
    };

    assert!(matches!(parse(&["status"]), ReleaseCommand::Status(s) if !s.json));
    assert!(matches!(parse(&["prepare"]), ReleaseCommand::Prepare));
    assert!(matches!(parse(&["push"]), ReleaseCommand::Push));
    assert!(matches!(parse(&["build", "--clean"]), ReleaseCommand::Build(_)));
    assert!(matches!(parse(&["all"]), ReleaseCommand::All(_)));
    assert!(matches!(
        parse(&["test-install", "-d", "out"]),
        ReleaseCommand::TestInstall(d) if d.directory == Some(PathBuf::from("out"))
    ));
}

#[test]
fn cli_release_upload_sign() {
    let cli = Cli::try_parse_from([
        "chores", "release", "upload", "-d", "build", "--index", "internal", "--sign",
    ])
    .unwrap();
    let Some(Command::Release(release)) = cli.command else {
        panic!("expected release command");
    };
    let ReleaseCommand::Upload(upload) = release.command else {
        panic!("expected upload");
    };

    let over = upload.to_override();
    assert_eq!(over.directory, Some(PathBuf::from("build")));
    assert_eq!(over.index.as_deref(), Some("internal"));
    assert_eq!(over.sign, Some(true));
}

#[test]
fn cli_release_build_wheel_only() {
    let cli = Cli::try_parse_from([
        "chores",
        "release",
        "build",
        "--no-sdist",
        "--python",
        "python3.12",
    ])
    .unwrap();
    let Some(Command::Release(release)) = cli.command else {
        panic!("expected release command");
    };
    let ReleaseCommand::Build(packaging) = release.command else {
        panic!("expected build");
    };

    let over = packaging.to_override();
    assert_eq!(over.sdist, Some(false));
    assert_eq!(over.wheel, None);
    assert_eq!(over.python, Some(PathBuf::from("python3.12")));
}

// =============================================================================
// Other Commands
// =============================================================================

#[test]
fn cli_integration_opts_with_hyphens() {
    let cli =
        Cli::try_parse_from(["chores", "integration", "-o", "--lf -p no:cacheprovider"]).unwrap();
    let Some(Command::Integration(args)) = cli.command else {
        panic!("expected integration command");
    };
    assert_eq!(args.opts.as_deref(), Some("--lf -p no:cacheprovider"));
}

#[test]
fn cli_coverage_report() {
    let cli = Cli::try_parse_from(["chores", "coverage", "-r", "html"]).unwrap();
    let Some(Command::Coverage(args)) = cli.command else {
        panic!("expected coverage command");
    };
    assert_eq!(args.report, "html");
}

#[test]
fn cli_docs_watch_interval() {
    let cli = Cli::try_parse_from(["chores", "docs", "watch", "--interval", "3"]).unwrap();
    let Some(Command::Docs(args)) = cli.command else {
        panic!("expected docs command");
    };
    assert!(matches!(args.command, DocsCommand::Watch(w) if w.interval == 3));
    assert!(args.site.is_none());
}

#[test]
fn cli_blacken_folders() {
    let cli = Cli::try_parse_from([
        "chores",
        "blacken",
        "--line-length",
        "88",
        "-f",
        "src",
        "-f",
        "tests",
        "--check",
    ])
    .unwrap();
    let Some(Command::Blacken(args)) = cli.command else {
        panic!("expected blacken command");
    };
    assert_eq!(args.line_length, Some(88));
    assert_eq!(args.folders, [PathBuf::from("src"), PathBuf::from("tests")]);
    assert!(args.check);
}

#[test]
fn cli_vendorize_from_git() {
    let cli = Cli::try_parse_from([
        "chores",
        "vendorize",
        "invoke",
        "main",
        "pkg/vendor",
        "--git-url",
        "https://example.com/invoke.git",
        "--package",
        "invoke",
    ])
    .unwrap();
    let Some(Command::Vendorize(args)) = cli.command else {
        panic!("expected vendorize command");
    };
    assert_eq!(args.git_url.as_deref(), Some("https://example.com/invoke.git"));
    assert_eq!(args.package.as_deref(), Some("invoke"));
    assert!(args.license.is_none());
}

#[test]
fn cli_ci_subcommands() {
    let cli = Cli::try_parse_from(["chores", "ci", "make-sudouser"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Command::Ci(ref ci)) if matches!(ci.command, CiCommand::MakeSudouser)
    ));

    let cli = Cli::try_parse_from(["chores", "ci", "make-sshable"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Command::Ci(ref ci)) if matches!(ci.command, CiCommand::MakeSshable)
    ));

    assert!(Cli::try_parse_from(["chores", "ci", "sudo-run"]).is_err());
}
