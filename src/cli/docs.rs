// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Documentation command arguments.
//!
//! ```text
//! docs [--site NAME] build [-c] [-b] [-n] [-o OPTS]
//! docs [--site NAME] clean | browse | doctest | tree
//! docs sites
//! docs watch [--interval SECS]
//! ```
//!
//! Without `--site` the `[sphinx]` layout is used.

use clap::{Args, Subcommand};

#[derive(Debug, Clone, Args)]
pub struct DocsArgs {
    /// Site under `sites/<NAME>` (or `[sites.<NAME>]`) to work on.
    #[arg(long, value_name = "NAME")]
    pub site: Option<String>,

    #[command(subcommand)]
    pub command: DocsCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DocsCommand {
    /// Builds the docs.
    Build(DocsBuildArgs),

    /// Removes the build output.
    Clean,

    /// Opens the built docs.
    Browse,

    /// Runs doctests into a scratch directory.
    Doctest,

    /// Prints the docs source tree.
    Tree,

    /// Builds every site, then builds them again nitpicky.
    Sites,

    /// Rebuilds sites whenever their sources change.
    Watch(WatchArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct DocsBuildArgs {
    /// Remove the build output first.
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Open the result afterwards.
    #[arg(short = 'b', long)]
    pub browse: bool,

    /// Treat warnings as errors (-n -W -T).
    #[arg(short = 'n', long)]
    pub nitpick: bool,

    /// Extra options passed through to sphinx-build.
    #[arg(short = 'o', long, value_name = "OPTS", allow_hyphen_values = true)]
    pub opts: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Seconds between scans.
    #[arg(long, value_name = "SECS", default_value_t = 1)]
    pub interval: u64,
}
