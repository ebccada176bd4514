// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::chores::CiCommand;
use crate::cli::docs::DocsCommand;
use crate::cli::release::ReleaseCommand;
use crate::cli::{Cli, Command};
use clap::{CommandFactory, Parser};

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["chores", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "chores",
        "-l",
        "5",
        "release",
        "status",
        "--dry",
        "-y",
        "-s",
        "packaging.sign=true",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(5));
    assert!(cli.global.dry);
    assert!(cli.global.assume_yes);
    assert_eq!(
        cli.global.to_config_overrides(),
        [
            "packaging.sign=true",
            "global.output_log_level=5",
            "global.file_log_level=5",
            "global.dry=true",
            "global.assume_yes=true",
        ]
    );
}

#[test]
fn test_parse_release_status_json() {
    let cli = Cli::try_parse_from(["chores", "release", "status", "--json"]).unwrap();
    let Some(Command::Release(args)) = cli.command else {
        panic!("expected release command");
    };
    assert!(matches!(args.command, ReleaseCommand::Status(s) if s.json));
}

#[test]
fn test_parse_publish_packaging_overrides() {
    let cli = Cli::try_parse_from([
        "chores",
        "release",
        "publish",
        "--no-sdist",
        "--sign",
        "--index",
        "testpypi",
        "-d",
        "/tmp/build",
    ])
    .unwrap();
    let Some(Command::Release(args)) = cli.command else {
        panic!("expected release command");
    };
    let ReleaseCommand::Publish(packaging) = args.command else {
        panic!("expected publish");
    };

    let over = packaging.to_override();
    assert_eq!(over.sdist, Some(false));
    assert_eq!(over.wheel, None);
    assert_eq!(over.sign, Some(true));
    assert_eq!(over.clean, None);
    assert_eq!(over.index.as_deref(), Some("testpypi"));
    assert_eq!(over.directory, Some(PathBuf::from("/tmp/build")));
}

#[test]
fn test_parse_test_flags() {
    let cli = Cli::try_parse_from([
        "chores", "test", "-v", "-k", "parser", "-x", "-o", "--lf", "-m", "config",
    ])
    .unwrap();
    let Some(Command::Test(args)) = cli.command else {
        panic!("expected test command");
    };
    assert!(args.verbose);
    assert!(args.x);
    assert_eq!(args.k.as_deref(), Some("parser"));
    assert_eq!(args.opts.as_deref(), Some("--lf"));
    assert_eq!(args.module.as_deref(), Some("config"));
    assert_eq!(args.capture, "sys");
}

#[test]
fn test_parse_docs_site_build() {
    let cli =
        Cli::try_parse_from(["chores", "docs", "--site", "www", "build", "-c", "-n"]).unwrap();
    let Some(Command::Docs(args)) = cli.command else {
        panic!("expected docs command");
    };
    assert_eq!(args.site.as_deref(), Some("www"));
    assert!(matches!(args.command, DocsCommand::Build(b) if b.clean && b.nitpick && !b.browse));
}

#[test]
fn test_parse_vendorize() {
    let cli = Cli::try_parse_from([
        "chores",
        "vendorize",
        "lexicon",
        "2.0.1",
        "pkg/vendor",
        "--license",
        "LICENSE",
    ])
    .unwrap();
    let Some(Command::Vendorize(args)) = cli.command else {
        panic!("expected vendorize command");
    };
    assert_eq!(args.distribution, "lexicon");
    assert_eq!(args.version, "2.0.1");
    assert_eq!(args.vendor_dir, PathBuf::from("pkg/vendor"));
    assert_eq!(args.license, Some(PathBuf::from("LICENSE")));
    assert!(args.git_url.is_none());
}

#[test]
fn test_parse_ci_sudo_run_keeps_hyphens() {
    let cli = Cli::try_parse_from(["chores", "ci", "sudo-run", "pytest", "-x", "tests"]).unwrap();
    let Some(Command::Ci(args)) = cli.command else {
        panic!("expected ci command");
    };
    let CiCommand::SudoRun { command } = args.command else {
        panic!("expected sudo-run");
    };
    assert_eq!(command, ["pytest", "-x", "tests"]);
}

#[test]
fn test_parse_missing_subcommand_is_none() {
    let cli = Cli::try_parse_from(["chores"]).unwrap();
    assert!(cli.command.is_none());
}
