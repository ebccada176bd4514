// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Changelog parsing.
//!
//! Reads a reStructuredText changelog written as a `releases`-style bullet
//! list and sorts every entry into a bucket:
//!
//! ```text
//! * :release:`1.1.2 <2024-03-01>`      newest first in the file
//! * :bug:`12` Fix a crash               minor bug -> every open line
//! * :feature:`10` Add a flag            major     -> unreleased_1_feature
//! * :bug:`9 major` Rework parsing       major
//! * :support:`8 backported` Docs        major, also every open line
//! * :release:`1.1.0 <2024-01-01>`
//!
//! buckets:
//!   "1.1.0"                 issues shipped in that release
//!   "1.1"                   unreleased bugfixes for the 1.1 line
//!   "unreleased_1_feature"  unreleased features for the next 1.x minor
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use regex::Regex;
use semver::Version;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ReleaseError, Result};

/// Bucket name -> issues, as consumed by release convergence.
pub type Changelog = BTreeMap<String, Vec<Issue>>;

/// Kind of a changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Bug,
    Feature,
    Support,
}

/// One unreleased or released changelog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Issue number; `None` for `-` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// `bug` promoted to the feature bucket via `major`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub major: bool,
    /// Feature or support item also shipped in bugfix lines.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub backported: bool,
    pub description: String,
}

impl Issue {
    #[must_use]
    pub fn new(kind: IssueKind, number: impl Into<String>) -> Self {
        Self {
            kind,
            number: Some(number.into()),
            major: false,
            backported: false,
            description: String::new(),
        }
    }

    /// Whether this issue belongs to the next feature release.
    #[must_use]
    pub fn is_major(&self) -> bool {
        match self.kind {
            IssueKind::Bug => self.major,
            IssueKind::Feature | IssueKind::Support => true,
        }
    }
}

/// Name of the unreleased feature bucket for a major version family.
#[must_use]
pub fn feature_bucket(major: u64) -> String {
    format!("unreleased_{major}_feature")
}

/// Name of the bugfix line bucket for `major.minor`.
#[must_use]
pub fn line_bucket(major: u64, minor: u64) -> String {
    format!("{major}.{minor}")
}

const ENTRY_PATTERN: &str = r"^\s*[*-]\s+:(release|bug|feature|support):`([^`]*)`\s*(.*)$";

#[derive(Debug)]
enum Entry {
    Release(Version),
    Issue(Issue),
}

/// Reads and parses a changelog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a release entry carries
/// an invalid version.
pub fn parse_file(path: &Path) -> Result<Changelog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read changelog {}", path.display()))?;
    let changelog =
        parse(&content).with_context(|| format!("failed to parse changelog {}", path.display()))?;
    debug!(
        path = %path.display(),
        buckets = changelog.len(),
        "parsed changelog"
    );
    Ok(changelog)
}

/// Parses changelog text into buckets.
///
/// # Errors
///
/// Returns `ReleaseError::InvalidVersion` for a `:release:` entry whose
/// version is not `X.Y.Z`.
pub fn parse(content: &str) -> Result<Changelog> {
    let entry_re = Regex::new(ENTRY_PATTERN).context("failed to compile changelog regex")?;
    let entries = scan_entries(content, &entry_re)?;
    let mut builder = BucketBuilder::default();
    for entry in entries.into_iter().rev() {
        match entry {
            Entry::Release(version) => builder.release(&version),
            Entry::Issue(issue) => builder.issue(issue),
        }
    }
    Ok(builder.finish())
}

/// Collects entries in file order, folding indented continuation lines into
/// the preceding entry's description.
fn scan_entries(content: &str, entry_re: &Regex) -> std::result::Result<Vec<Entry>, ReleaseError> {
    let mut entries = Vec::new();
    let mut continuing = false;

    for line in content.lines() {
        if let Some(caps) = entry_re.captures(line) {
            let role = &caps[1];
            let target = caps[2].trim();
            let text = caps[3].trim().to_string();
            entries.push(if role == "release" {
                Entry::Release(parse_release_target(target)?)
            } else {
                Entry::Issue(parse_issue(role, target, text))
            });
            continuing = true;
            continue;
        }

        let indented = line.starts_with(char::is_whitespace) && !line.trim().is_empty();
        if !(continuing && indented) {
            continuing = false;
            continue;
        }
        if let Some(Entry::Issue(issue)) = entries.last_mut() {
            if !issue.description.is_empty() {
                issue.description.push(' ');
            }
            issue.description.push_str(line.trim());
        }
    }

    Ok(entries)
}

fn parse_release_target(target: &str) -> std::result::Result<Version, ReleaseError> {
    let number = target.split_whitespace().next().unwrap_or_default();
    Version::parse(number).map_err(|e| ReleaseError::InvalidVersion {
        version: number.to_string(),
        message: e.to_string(),
    })
}

fn parse_issue(role: &str, target: &str, description: String) -> Issue {
    let kind = match role {
        "feature" => IssueKind::Feature,
        "support" => IssueKind::Support,
        _ => IssueKind::Bug,
    };
    let mut words = target.split_whitespace();
    let number = words
        .next()
        .filter(|n| *n != "-" && *n != "0")
        .map(str::to_string);
    let mut issue = Issue {
        kind,
        number,
        major: false,
        backported: false,
        description,
    };
    for word in words {
        match word {
            "major" => issue.major = true,
            "backported" => issue.backported = true,
            other => trace!(keyword = other, "ignoring changelog keyword"),
        }
    }
    issue
}

/// Replays entries oldest first.
struct BucketBuilder {
    changelog: Changelog,
    family: u64,
}

impl Default for BucketBuilder {
    fn default() -> Self {
        let mut changelog = Changelog::new();
        changelog.insert(feature_bucket(1), Vec::new());
        Self {
            changelog,
            family: 1,
        }
    }
}

impl BucketBuilder {
    fn feature_key(&self) -> String {
        feature_bucket(self.family)
    }

    /// Open bugfix lines of the current major family.
    fn line_keys(&self) -> Vec<String> {
        let prefix = format!("{}.", self.family);
        self.changelog
            .keys()
            .filter(|k| {
                k.strip_prefix(&prefix).is_some_and(|minor| {
                    !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit())
                })
            })
            .cloned()
            .collect()
    }

    fn issue(&mut self, issue: Issue) {
        let lines = self.line_keys();
        if issue.is_major() {
            if issue.backported {
                for line in &lines {
                    self.push(line, issue.clone());
                }
            }
            let key = self.feature_key();
            self.push(&key, issue);
        } else if lines.is_empty() {
            let key = self.feature_key();
            self.push(&key, issue);
        } else {
            for line in &lines {
                self.push(line, issue.clone());
            }
        }
    }

    fn release(&mut self, version: &Version) {
        let issues = if version.patch == 0 {
            let drained = self
                .changelog
                .remove(&self.feature_key())
                .unwrap_or_default();
            self.family = version.major;
            self.changelog.entry(self.feature_key()).or_default();
            drained
        } else {
            self.changelog
                .remove(&line_bucket(version.major, version.minor))
                .unwrap_or_default()
        };
        self.changelog
            .insert(line_bucket(version.major, version.minor), Vec::new());
        self.changelog.insert(version.to_string(), issues);
    }

    fn push(&mut self, key: &str, issue: Issue) {
        self.changelog.entry(key.to_string()).or_default().push(issue);
    }

    fn finish(mut self) -> Changelog {
        self.changelog.entry(self.feature_key()).or_default();
        self.changelog
    }
}
