// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release-state convergence.
//!
//! Compares what the project looks like with what it should look like for
//! the next release on the current branch:
//!
//! ```text
//!  branch ----> release_line() ----> Bugfix "1.1" | Feature "main" | Undefined
//!                                        |
//!  changelog --> release_and_issues() ---+--> latest, next, expected
//!  git tags  ------------------------------+      |
//!  __version__ ----------------------------+      v
//!                                      ,------------------,
//!                                      | Actions          |
//!                                      |  changelog  ✔/✘  |
//!                                      |  version    ✔/✘  |
//!                                      |  tag        ✔/✘  |
//!                                      '------------------'
//! ```
//!
//! - Feature lines aim for `latest_overall.next_minor()`.
//! - Bugfix lines aim for `latest_on_line.next_patch()`.
//! - With nothing unreleased the expected version is the latest release
//!   itself.
//!
//! Everything except [`gather`] is pure so the decision logic can be tested
//! without a repository.

pub mod changelog;
pub mod version;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::git::query;

pub use changelog::{Changelog, Issue, IssueKind};

static BUGFIX_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)$").expect("bugfix branch pattern compiles"));
static FEATURE_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(main|master)$").expect("feature branch pattern compiles"));
static RELEASE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("release key pattern compiles")
});

/// What kind of release the checked-out branch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseLine {
    /// A stable `X.Y` branch cutting `X.Y.Z` patch releases.
    Bugfix,
    /// `main`/`master`, cutting `X.Y.0` feature releases.
    Feature,
    /// Anything else: topic branches, detached `HEAD`.
    Undefined,
}

impl fmt::Display for ReleaseLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bugfix => "bugfix",
            Self::Feature => "feature",
            Self::Undefined => "undefined",
        })
    }
}

/// Changelog component status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangelogStatus {
    Okay,
    NeedsRelease,
}

/// Version file component status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Okay,
    NeedsBump,
}

/// Git tag component status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    Okay,
    NeedsCutting,
}

impl ChangelogStatus {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Okay => "✔ no unreleased issues",
            Self::NeedsRelease => "✘ needs :release: entry",
        }
    }
}

impl VersionStatus {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Okay => "✔ version up to date",
            Self::NeedsBump => "✘ needs version bump",
        }
    }
}

impl TagStatus {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Okay => "✔ all set",
            Self::NeedsCutting => "✘ needs cutting",
        }
    }
}

/// Per-component verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Actions {
    pub changelog: ChangelogStatus,
    pub version: VersionStatus,
    pub tag: TagStatus,
    /// No component needs work.
    pub all_okay: bool,
}

impl Actions {
    fn new(changelog: ChangelogStatus, version: VersionStatus, tag: TagStatus) -> Self {
        Self {
            changelog,
            version,
            tag,
            all_okay: changelog == ChangelogStatus::Okay
                && version == VersionStatus::Okay
                && tag == TagStatus::Okay,
        }
    }

    /// Table rows in the order things usually get fixed.
    #[must_use]
    pub const fn rows(&self) -> [(&'static str, &'static str); 3] {
        [
            ("Changelog", self.changelog.text()),
            ("Version", self.version.text()),
            ("Tag", self.tag.text()),
        ]
    }
}

/// Raw facts about the project, collected before deciding anything.
#[derive(Debug, Clone)]
pub struct ReleaseInputs {
    pub branch: String,
    pub changelog: Changelog,
    /// Every tag name; non-semver tags are dropped during convergence.
    pub tags: Vec<String>,
    pub current_version: String,
}

/// The data convergence decided on, for display and follow-up actions.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseState {
    pub branch: String,
    pub release_type: ReleaseLine,
    pub changelog: Changelog,
    pub latest_line_release: Option<Version>,
    pub latest_overall_release: Option<Version>,
    pub unreleased_issues: Vec<Issue>,
    pub current_version: Version,
    pub latest_version: Version,
    pub next_version: Version,
    pub expected_version: Version,
    /// Semver tags, sorted.
    pub tags: Vec<Version>,
}

/// Classifies a branch name.
#[must_use]
pub fn release_line(branch: &str) -> ReleaseLine {
    if BUGFIX_BRANCH.is_match(branch) {
        ReleaseLine::Bugfix
    } else if FEATURE_BRANCH.is_match(branch) {
        ReleaseLine::Feature
    } else {
        ReleaseLine::Undefined
    }
}

/// `(major, minor)` of a bugfix branch name like `1.1`.
fn bugfix_line(branch: &str) -> Option<(u64, u64)> {
    let caps = BUGFIX_BRANCH.captures(branch)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Highest-numbered `unreleased_N_feature` bucket, compared numerically.
#[must_use]
pub fn latest_feature_bucket(changelog: &Changelog) -> Option<&str> {
    changelog
        .keys()
        .filter_map(|key| {
            let family = key.strip_prefix("unreleased_")?.strip_suffix("_feature")?;
            Some((family.parse::<u64>().ok()?, key.as_str()))
        })
        .max_by_key(|(family, _)| *family)
        .map(|(_, key)| key)
}

/// Every released version in the changelog, ascending.
#[must_use]
pub fn versions_from_changelog(changelog: &Changelog) -> Vec<Version> {
    let mut versions: Vec<Version> = changelog
        .keys()
        .filter(|key| is_release_key(key))
        .filter_map(|key| Version::parse(key).ok())
        .collect();
    versions.sort();
    versions
}

/// Matches `X.Y.Z` with plain numeric parts.
fn is_release_key(key: &str) -> bool {
    RELEASE_KEY.is_match(key)
}

/// Latest release appropriate to the branch and its unreleased issues.
///
/// The release is only known for bugfix lines; feature lines return `None`.
///
/// # Errors
///
/// - `UndefinedReleaseType` for an undefined line.
/// - `MissingBucket` if the changelog lacks the bucket.
/// - `NoLineRelease` if a bugfix line has never been released.
pub fn release_and_issues<'a>(
    changelog: &'a Changelog,
    branch: &str,
    line: ReleaseLine,
) -> std::result::Result<(Option<Version>, &'a [Issue]), ReleaseError> {
    match line {
        ReleaseLine::Undefined => Err(ReleaseError::UndefinedReleaseType {
            branch: branch.to_string(),
        }),
        ReleaseLine::Feature => {
            let bucket = latest_feature_bucket(changelog).ok_or_else(|| {
                ReleaseError::MissingBucket {
                    bucket: changelog::feature_bucket(1),
                }
            })?;
            Ok((None, changelog[bucket].as_slice()))
        }
        ReleaseLine::Bugfix => {
            let issues = changelog
                .get(branch)
                .ok_or_else(|| ReleaseError::MissingBucket {
                    bucket: branch.to_string(),
                })?;
            let (major, minor) =
                bugfix_line(branch).ok_or_else(|| ReleaseError::UndefinedReleaseType {
                    branch: branch.to_string(),
                })?;
            let release = versions_from_changelog(changelog)
                .into_iter()
                .rev()
                .find(|v| v.major == major && v.minor == minor)
                .ok_or_else(|| ReleaseError::NoLineRelease {
                    line: branch.to_string(),
                })?;
            Ok((Some(release), issues.as_slice()))
        }
    }
}

/// Semver tags, sorted; anything else is skipped.
#[must_use]
pub fn semver_tags(tags: &[String]) -> Vec<Version> {
    let mut versions: Vec<Version> = tags
        .iter()
        .filter_map(|tag| match Version::parse(tag) {
            Ok(version) => Some(version),
            Err(e) => {
                trace!(tag = %tag, error = %e, "ignoring non-release tag");
                None
            }
        })
        .collect();
    versions.sort();
    versions
}

fn next_minor(version: &Version) -> std::result::Result<Version, ReleaseError> {
    let minor = version
        .minor
        .checked_add(1)
        .ok_or_else(|| ReleaseError::VersionOverflow {
            version: version.to_string(),
        })?;
    Ok(Version::new(version.major, minor, 0))
}

fn next_patch(version: &Version) -> std::result::Result<Version, ReleaseError> {
    let patch = version
        .patch
        .checked_add(1)
        .ok_or_else(|| ReleaseError::VersionOverflow {
            version: version.to_string(),
        })?;
    Ok(Version::new(version.major, version.minor, patch))
}

/// Decides what needs doing for the next release.
///
/// # Errors
///
/// Returns a `ReleaseError` for undefined branches, missing buckets, lines
/// or changelogs without releases, and unparseable current versions.
pub fn converge(
    inputs: &ReleaseInputs,
) -> std::result::Result<(Actions, ReleaseState), ReleaseError> {
    let release_type = release_line(&inputs.branch);
    let (line_release, issues) =
        release_and_issues(&inputs.changelog, &inputs.branch, release_type)?;
    let overall_release = versions_from_changelog(&inputs.changelog).pop();
    let current_version =
        Version::parse(inputs.current_version.trim()).map_err(|e| ReleaseError::InvalidVersion {
            version: inputs.current_version.clone(),
            message: e.to_string(),
        })?;
    let tags = semver_tags(&inputs.tags);

    let (latest_version, next_version) = match (release_type, &line_release, &overall_release) {
        (ReleaseLine::Bugfix, Some(latest), _) => (latest.clone(), next_patch(latest)?),
        (ReleaseLine::Feature, _, Some(latest)) => (latest.clone(), next_minor(latest)?),
        _ => return Err(ReleaseError::NoReleases),
    };
    let expected_version = if issues.is_empty() {
        latest_version.clone()
    } else {
        next_version.clone()
    };

    let changelog = if issues.is_empty() {
        ChangelogStatus::Okay
    } else {
        ChangelogStatus::NeedsRelease
    };
    let version = if current_version == expected_version {
        VersionStatus::Okay
    } else {
        VersionStatus::NeedsBump
    };
    let tag = if tags.contains(&expected_version) {
        TagStatus::Okay
    } else {
        TagStatus::NeedsCutting
    };
    let actions = Actions::new(changelog, version, tag);

    debug!(
        branch = %inputs.branch,
        release_type = %release_type,
        expected = %expected_version,
        current = %current_version,
        all_okay = actions.all_okay,
        "converged release state"
    );

    let state = ReleaseState {
        branch: inputs.branch.clone(),
        release_type,
        changelog: inputs.changelog.clone(),
        latest_line_release: line_release,
        latest_overall_release: overall_release,
        unreleased_issues: issues.to_vec(),
        current_version,
        latest_version,
        next_version,
        expected_version,
        tags,
    };

    Ok((actions, state))
}

/// Collects [`ReleaseInputs`] from the project at `root`.
///
/// The branch is classified first, so an undefined branch fails with
/// `UndefinedReleaseType` before the changelog or version file are read.
///
/// # Errors
///
/// Returns an error if git queries fail, the branch is undefined, or the
/// changelog or version file cannot be read.
pub fn gather(root: &Path, config: &Config) -> Result<ReleaseInputs> {
    let branch = query::abbrev_head(root)?;
    if release_line(&branch) == ReleaseLine::Undefined {
        return Err(ReleaseError::UndefinedReleaseType { branch }.into());
    }

    let changelog = changelog::parse_file(&root.join(&config.packaging.changelog_file))?;
    let current_version = load_current_version(root, config, &config.version_regex()?)?;
    let tags = query::tags(root)?;

    Ok(ReleaseInputs {
        branch,
        changelog,
        tags,
        current_version,
    })
}

fn load_current_version(root: &Path, config: &Config, pattern: &Regex) -> Result<String> {
    let package = version::find_package(root, config.packaging.package.as_deref())?;
    let path = version::version_file(root, &package, &config.packaging.version_module);
    version::load_version(&path, pattern)
}

/// Renders actions as a borderless two-column table.
///
/// ```text
/// ---------  ----------------------
/// Changelog  ✔ no unreleased issues
/// Version    ✔ version up to date
/// Tag        ✔ all set
/// ---------  ----------------------
/// ```
#[must_use]
pub fn status_table(actions: &Actions) -> String {
    let rows = actions.rows();
    let left = rows.iter().map(|(c, _)| c.chars().count()).max().unwrap_or(0);
    let right = rows.iter().map(|(_, s)| s.chars().count()).max().unwrap_or(0);
    let rule = format!("{}  {}", "-".repeat(left), "-".repeat(right));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(rule.clone());
    for (component, status) in rows {
        lines.push(format!("{component:<left$}  {status}"));
    }
    lines.push(rule);
    lines.join("\n")
}
