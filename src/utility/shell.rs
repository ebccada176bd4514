// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! POSIX shell word splitting for user-supplied option strings.

use anyhow::Context;

use crate::error::Result;

/// Splits `line` the way `sh` would, honoring quotes and backslashes.
///
/// # Errors
///
/// Returns an error on unbalanced quotes or a trailing backslash.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    shell_words::split(line).with_context(|| format!("Can't split options: {line}"))
}
