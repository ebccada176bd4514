// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release and packaging command arguments.
//!
//! ```text
//! release status [--json]
//! release prepare
//! release build        [packaging flags]
//! release publish      [packaging flags]
//! release upload       [--directory DIR] [--index NAME] [--sign]
//! release test-install [--directory DIR]
//! release push
//! release all          [packaging flags]
//! ```
//!
//! Packaging flags come in `--x`/`--no-x` pairs; omitting both keeps the
//! `[packaging]` value.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::merge::PackagingOverride;

/// Arguments for the `release` command.
#[derive(Debug, Clone, Args)]
pub struct ReleaseArgs {
    #[command(subcommand)]
    pub command: ReleaseCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReleaseCommand {
    /// Shows what the changelog, version file and tag still need.
    Status(StatusArgs),

    /// Edits the changelog and version file, then commits and tags.
    Prepare,

    /// Builds sdist and/or wheel archives.
    Build(PackagingArgs),

    /// Builds, checks, test-installs and uploads archives.
    Publish(PackagingArgs),

    /// Uploads (and optionally signs) archives in `<directory>/dist`.
    Upload(UploadArgs),

    /// Installs each archive in `<directory>/dist` into a fresh virtualenv.
    #[command(name = "test-install")]
    TestInstall(DirectoryArgs),

    /// Pushes the current branch and its tags.
    Push,

    /// Runs prepare, publish and push in order.
    All(PackagingArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Prints the actions as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DirectoryArgs {
    /// Base directory holding `dist/`; the working directory by default.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct UploadArgs {
    #[command(flatten)]
    pub directory: DirectoryArgs,

    /// Named repository from `.pypirc`.
    #[arg(long, value_name = "NAME")]
    pub index: Option<String>,

    /// GPG-sign archives before uploading.
    #[arg(long)]
    pub sign: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PackagingArgs {
    /// Build a source distribution.
    #[arg(long, overrides_with = "no_sdist")]
    pub sdist: bool,
    /// Don't build a source distribution.
    #[arg(long = "no-sdist")]
    pub no_sdist: bool,

    /// Build a wheel.
    #[arg(long, overrides_with = "no_wheel")]
    pub wheel: bool,
    /// Don't build a wheel.
    #[arg(long = "no-wheel")]
    pub no_wheel: bool,

    /// Remove `dist/` and `build/` first.
    #[arg(long)]
    pub clean: bool,

    /// Base directory for `dist/` and `build/`.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Interpreter running `setup.py`.
    #[arg(long, value_name = "PYTHON")]
    pub python: Option<PathBuf>,

    /// Named repository from `.pypirc`.
    #[arg(long, value_name = "NAME")]
    pub index: Option<String>,

    /// GPG-sign archives before uploading.
    #[arg(long)]
    pub sign: bool,

    /// Also build a wheel with the alternate interpreter.
    #[arg(long = "dual-wheels")]
    pub dual_wheels: bool,

    /// Alternate interpreter for --dual-wheels.
    #[arg(long = "alt-python", value_name = "PYTHON")]
    pub alt_python: Option<String>,

    /// Run `setup.py check -r -s` first.
    #[arg(long = "check-desc")]
    pub check_desc: bool,
}

/// `Some(true)` for `--x`, `Some(false)` for `--no-x`, `None` for neither.
const fn toggle(yes: bool, no: bool) -> Option<bool> {
    if no {
        Some(false)
    } else if yes {
        Some(true)
    } else {
        None
    }
}

/// `Some(true)` when the flag is given.
const fn flag(set: bool) -> Option<bool> {
    if set { Some(true) } else { None }
}

impl PackagingArgs {
    #[must_use]
    pub fn to_override(&self) -> PackagingOverride {
        PackagingOverride {
            sdist: toggle(self.sdist, self.no_sdist),
            wheel: toggle(self.wheel, self.no_wheel),
            clean: flag(self.clean),
            directory: self.directory.clone(),
            python: self.python.clone(),
            index: self.index.clone(),
            sign: flag(self.sign),
            dual_wheels: flag(self.dual_wheels),
            alt_python: self.alt_python.clone(),
            check_desc: flag(self.check_desc),
        }
    }
}

impl UploadArgs {
    #[must_use]
    pub fn to_override(&self) -> PackagingOverride {
        PackagingOverride {
            directory: self.directory.directory.clone(),
            index: self.index.clone(),
            sign: flag(self.sign),
            ..PackagingOverride::default()
        }
    }
}
