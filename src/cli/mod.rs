// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for chores-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! chores [global options] <command>
//! release {status|prepare|build|publish|upload|test-install|push|all}
//! test | integration | coverage
//! docs {build|clean|browse|doctest|tree|sites|watch}
//! blacken
//! vendorize
//! ci {make-sudouser|sudo-run|make-sshable}
//! version | options | inis
//! ```

pub mod chores;
pub mod docs;
pub mod global;
pub mod release;
pub mod testing;

#[cfg(test)]
mod tests;

use crate::cli::chores::{BlackenArgs, CiArgs, VendorizeArgs};
use crate::cli::docs::DocsArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::release::ReleaseArgs;
use crate::cli::testing::{CoverageArgs, TestArgs};
use clap::{Parser, Subcommand};

/// Project Task Runner
///
/// Build, test, document, release and publish Python-style projects.
#[derive(Debug, Parser)]
#[command(
    name = "chores",
    author,
    version,
    about = "Project Task Runner",
    long_about = "chores-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Build, test, document, release and publish Python-style projects.\n\n\
                  `chores release status` shows what a release still needs;\n\
                  `chores release all` does it. See `chores <command> --help`\n\
                  for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, chores loads `chores.toml` from the current\n\
                  directory if it exists. Additional files can be given with\n\
                  --ini; those are loaded after it and override it. CHORES_*\n\
                  environment variables (e.g. CHORES_PACKAGING__SIGN=true)\n\
                  override files, and --set overrides everything. Use\n\
                  --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used by chores.
    Inis,

    /// Release convergence and packaging.
    Release(ReleaseArgs),

    /// Runs the unit test suite.
    Test(TestArgs),

    /// Runs the integration test suite.
    Integration(TestArgs),

    /// Runs the unit tests with coverage.
    Coverage(CoverageArgs),

    /// Builds and maintains Sphinx documentation.
    Docs(DocsArgs),

    /// Formats sources with black.
    Blacken(BlackenArgs),

    /// Copies a third-party package's source into a vendor folder.
    Vendorize(VendorizeArgs),

    /// Continuous-integration helpers.
    Ci(CiArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
