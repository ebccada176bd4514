// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Execution environment detection.

/// Variables whose non-empty presence marks a CI run.
pub const CI_MARKERS: [&str; 2] = ["CIRCLECI", "TRAVIS"];

/// Whether this process runs on a known CI service.
#[must_use]
pub fn in_ci() -> bool {
    in_ci_with(|key| std::env::var(key).ok())
}

/// [`in_ci`] with an injectable variable lookup.
#[must_use]
pub fn in_ci_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    CI_MARKERS
        .iter()
        .any(|key| lookup(key).is_some_and(|value| !value.is_empty()))
}
