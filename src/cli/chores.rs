// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the smaller chores.
//!
//! ```text
//! blacken   [--line-length N] [-f FOLDER]... [-c]
//! vendorize DIST VERSION VENDOR_DIR [--package P] [--git-url URL] [--license FILE]
//! ci        make-sudouser | sudo-run COMMAND | make-sshable
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct BlackenArgs {
    /// Maximum line length; `blacken.line_length` when omitted.
    #[arg(long = "line-length", value_name = "N")]
    pub line_length: Option<u16>,

    /// Folder to format; `blacken.folders` when omitted. Can repeat.
    #[arg(short = 'f', long = "folder", value_name = "FOLDER")]
    pub folders: Vec<PathBuf>,

    /// Only report files that would be reformatted.
    #[arg(short = 'c', long)]
    pub check: bool,
}

#[derive(Debug, Clone, Args)]
pub struct VendorizeArgs {
    /// Distribution name on the package index.
    #[arg(value_name = "DIST")]
    pub distribution: String,

    /// Release version, or a git ref with --git-url.
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Vendor folder, e.g. `mypackage/vendor`.
    #[arg(value_name = "VENDOR_DIR")]
    pub vendor_dir: PathBuf,

    /// Package folder name when it differs from the distribution name.
    #[arg(long, value_name = "NAME")]
    pub package: Option<String>,

    /// Clone this repository instead of downloading from the index.
    #[arg(long = "git-url", value_name = "URL")]
    pub git_url: Option<String>,

    /// License file to copy in, relative to the unpacked source root.
    #[arg(long, value_name = "FILE")]
    pub license: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct CiArgs {
    #[command(subcommand)]
    pub command: CiCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CiCommand {
    /// Creates the passworded sudo-capable user from `[ci.sudo]`.
    #[command(name = "make-sudouser")]
    MakeSudouser,

    /// Runs a shell command as that user, keeping PATH.
    #[command(name = "sudo-run")]
    SudoRun {
        /// Command line to run.
        #[arg(value_name = "COMMAND", num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Gives that user a passwordless SSH key authorized for localhost.
    #[command(name = "make-sshable")]
    MakeSshable,
}
