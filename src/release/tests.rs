// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    Actions, Changelog, ChangelogStatus, Issue, IssueKind, ReleaseInputs, ReleaseLine, TagStatus,
    VersionStatus, converge, latest_feature_bucket, release_and_issues, release_line, semver_tags,
    status_table, versions_from_changelog,
};
use crate::error::ReleaseError;
use semver::Version;

fn bugs(numbers: &[u32]) -> Vec<Issue> {
    numbers
        .iter()
        .map(|n| Issue::new(IssueKind::Bug, n.to_string()))
        .collect()
}

fn changelog(buckets: &[(&str, &[u32])]) -> Changelog {
    buckets
        .iter()
        .map(|(name, issues)| ((*name).to_string(), bugs(issues)))
        .collect()
}

fn inputs(branch: &str, changelog: Changelog, version: &str, tags: &[&str]) -> ReleaseInputs {
    ReleaseInputs {
        branch: branch.to_string(),
        changelog,
        tags: tags.iter().map(ToString::to_string).collect(),
        current_version: version.to_string(),
    }
}

/// 1.1 line: 1.1.0 and 1.1.1 released, two bugs waiting.
fn unreleased_bugs() -> Changelog {
    changelog(&[
        ("1.1", &[3, 4]),
        ("1.1.0", &[1]),
        ("1.1.1", &[2]),
        ("unreleased_1_feature", &[]),
    ])
}

/// 1.1 line: 1.1.2 released, nothing waiting.
fn no_unreleased_bugs() -> Changelog {
    changelog(&[
        ("1.1", &[]),
        ("1.1.0", &[1]),
        ("1.1.1", &[2]),
        ("1.1.2", &[3, 4]),
        ("unreleased_1_feature", &[]),
    ])
}

fn actions(branch: &str, changelog: Changelog, version: &str, tags: &[&str]) -> Actions {
    converge(&inputs(branch, changelog, version, tags)).unwrap().0
}

// --- release_line ---

#[test]
fn test_release_line_bugfix_branch() {
    assert_eq!(release_line("2.7"), ReleaseLine::Bugfix);
    assert_eq!(release_line("10.23"), ReleaseLine::Bugfix);
}

#[test]
fn test_release_line_feature_branch() {
    assert_eq!(release_line("main"), ReleaseLine::Feature);
    assert_eq!(release_line("master"), ReleaseLine::Feature);
}

#[test]
fn test_release_line_undefined() {
    for branch in [
        "yea-whatever", "HEAD", "1.1.x", "1.", ".1", "1.1.0", "main2", "v1.1", "xmain", "١.٢",
    ] {
        assert_eq!(release_line(branch), ReleaseLine::Undefined, "{branch}");
    }
}

// --- latest_feature_bucket ---

#[test]
fn test_latest_feature_bucket_single_family() {
    let log = changelog(&[("unreleased_1_feature", &[])]);
    assert_eq!(latest_feature_bucket(&log), Some("unreleased_1_feature"));
}

#[test]
fn test_latest_feature_bucket_orders_numerically() {
    let log = changelog(&[
        ("unreleased_1_feature", &[]),
        ("unreleased_10_feature", &[]),
        ("unreleased_23_feature", &[]),
        ("unreleased_202_feature", &[]),
        ("unreleased_17_feature", &[]),
        ("unreleased_2_feature", &[]),
    ]);
    assert_eq!(latest_feature_bucket(&log), Some("unreleased_202_feature"));
}

#[test]
fn test_latest_feature_bucket_absent() {
    assert_eq!(latest_feature_bucket(&changelog(&[("1.0.0", &[])])), None);
}

// --- versions_from_changelog ---

#[test]
fn test_versions_from_changelog_sorted_semver() {
    let log = changelog(&[
        ("1.10.0", &[]),
        ("1.2.0", &[]),
        ("1.2", &[]),
        ("1.9.3", &[]),
        ("unreleased_1_feature", &[]),
    ]);
    let versions: Vec<String> = versions_from_changelog(&log)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(versions, ["1.2.0", "1.9.3", "1.10.0"]);
}

// --- release_and_issues ---

#[test]
fn test_release_and_issues_bugfix_no_unreleased() {
    let log = changelog(&[("1.1", &[]), ("1.1.0", &[1, 2])]);
    let (release, issues) = release_and_issues(&log, "1.1", ReleaseLine::Bugfix).unwrap();
    assert_eq!(release, Some(Version::new(1, 1, 0)));
    assert!(issues.is_empty());
}

#[test]
fn test_release_and_issues_bugfix_has_unreleased() {
    let log = unreleased_bugs();
    let (release, issues) = release_and_issues(&log, "1.1", ReleaseLine::Bugfix).unwrap();
    assert_eq!(release, Some(Version::new(1, 1, 1)));
    assert_eq!(issues, bugs(&[3, 4]).as_slice());
}

#[test]
fn test_release_and_issues_bugfix_matches_line_exactly() {
    let log = changelog(&[("1.1", &[]), ("1.1.4", &[]), ("1.10.0", &[])]);
    let (release, _) = release_and_issues(&log, "1.1", ReleaseLine::Bugfix).unwrap();
    assert_eq!(release, Some(Version::new(1, 1, 4)));
}

#[test]
fn test_release_and_issues_feature() {
    let log = changelog(&[
        ("1.0.0", &[1]),
        ("unreleased_1_feature", &[7]),
        ("unreleased_2_feature", &[8, 9]),
    ]);
    let (release, issues) = release_and_issues(&log, "main", ReleaseLine::Feature).unwrap();
    assert_eq!(release, None);
    assert_eq!(issues, bugs(&[8, 9]).as_slice());
}

#[test]
fn test_release_and_issues_errors() {
    let log = changelog(&[("1.2", &[]), ("1.1.0", &[])]);

    assert!(matches!(
        release_and_issues(&log, "feature/x", ReleaseLine::Undefined),
        Err(ReleaseError::UndefinedReleaseType { branch }) if branch == "feature/x"
    ));
    assert!(matches!(
        release_and_issues(&log, "1.3", ReleaseLine::Bugfix),
        Err(ReleaseError::MissingBucket { bucket }) if bucket == "1.3"
    ));
    assert!(matches!(
        release_and_issues(&log, "1.2", ReleaseLine::Bugfix),
        Err(ReleaseError::NoLineRelease { line }) if line == "1.2"
    ));
    assert!(matches!(
        release_and_issues(&log, "main", ReleaseLine::Feature),
        Err(ReleaseError::MissingBucket { .. })
    ));
}

// --- converge: bugfix line with unreleased issues ---

#[test]
fn test_converge_unreleased_version_equals_latest() {
    let actions = actions("1.1", unreleased_bugs(), "1.1.1", &["1.1.0", "1.1.1"]);
    assert_eq!(actions.changelog, ChangelogStatus::NeedsRelease);
    assert_eq!(actions.version, VersionStatus::NeedsBump);
    assert_eq!(actions.tag, TagStatus::NeedsCutting);
    assert!(!actions.all_okay);
}

#[test]
fn test_converge_unreleased_version_file_is_newer() {
    let actions = actions("1.1", unreleased_bugs(), "1.1.2", &["1.1.1"]);
    assert_eq!(actions.changelog, ChangelogStatus::NeedsRelease);
    assert_eq!(actions.version, VersionStatus::Okay);
}

// --- converge: bugfix line without unreleased issues ---

#[test]
fn test_converge_no_unreleased_no_updates_necessary() {
    let actions = actions("1.1", no_unreleased_bugs(), "1.1.2", &["1.1.1", "1.1.2"]);
    assert_eq!(actions.changelog, ChangelogStatus::Okay);
    assert_eq!(actions.version, VersionStatus::Okay);
    assert_eq!(actions.tag, TagStatus::Okay);
    assert!(actions.all_okay);
}

#[test]
fn test_converge_no_unreleased_changelog_is_newer() {
    let actions = actions("1.1", no_unreleased_bugs(), "1.1.1", &["1.1.2"]);
    assert_eq!(actions.changelog, ChangelogStatus::Okay);
    assert_eq!(actions.version, VersionStatus::NeedsBump);
}

#[test]
fn test_converge_no_unreleased_version_file_is_newer() {
    // Expected version is the latest release; anything else needs a bump.
    let actions = actions("1.1", no_unreleased_bugs(), "1.1.3", &["1.1.2"]);
    assert_eq!(actions.changelog, ChangelogStatus::Okay);
    assert_eq!(actions.version, VersionStatus::NeedsBump);
}

// --- converge: feature line ---

#[test]
fn test_converge_feature_line_targets_next_minor() {
    let log = changelog(&[
        ("1.0.0", &[1]),
        ("1.1.0", &[2]),
        ("1.1.3", &[3]),
        ("1.1", &[]),
        ("unreleased_1_feature", &[9]),
    ]);
    let (actions, state) = converge(&inputs("main", log, "1.1.3", &["1.1.3"])).unwrap();

    assert_eq!(state.release_type, ReleaseLine::Feature);
    assert_eq!(state.latest_line_release, None);
    assert_eq!(state.latest_overall_release, Some(Version::new(1, 1, 3)));
    assert_eq!(state.latest_version, Version::new(1, 1, 3));
    assert_eq!(state.next_version, Version::new(1, 2, 0));
    assert_eq!(state.expected_version, Version::new(1, 2, 0));
    assert_eq!(actions.changelog, ChangelogStatus::NeedsRelease);
    assert_eq!(actions.version, VersionStatus::NeedsBump);
    assert_eq!(actions.tag, TagStatus::NeedsCutting);
}

#[test]
fn test_converge_feature_line_all_released() {
    let log = changelog(&[("1.2.0", &[1]), ("1.2", &[]), ("unreleased_1_feature", &[])]);
    let (actions, state) =
        converge(&inputs("master", log, "1.2.0", &["1.2.0", "not-a-version", "v1.3.0"])).unwrap();

    assert!(actions.all_okay);
    assert_eq!(state.expected_version, Version::new(1, 2, 0));
    assert_eq!(state.tags, vec![Version::new(1, 2, 0)]);
}

#[test]
fn test_converge_feature_line_without_releases() {
    let log = changelog(&[("unreleased_1_feature", &[1])]);
    let err = converge(&inputs("main", log, "0.1.0", &[])).unwrap_err();
    assert!(matches!(err, ReleaseError::NoReleases));
}

// --- converge: errors ---

#[test]
fn test_converge_undefined_branch_raises() {
    let err = converge(&inputs("whatever", no_unreleased_bugs(), "1.1.2", &[])).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"You don't seem to be on a release-related branch; why are you trying to cut a release?"
    );
}

#[test]
fn test_converge_invalid_current_version() {
    let err = converge(&inputs("1.1", no_unreleased_bugs(), "1.1", &[])).unwrap_err();
    assert!(matches!(err, ReleaseError::InvalidVersion { version, .. } if version == "1.1"));
}

#[test]
fn test_converge_patch_overflow() {
    let log = changelog(&[
        ("1.1", &[3]),
        ("1.1.18446744073709551615", &[1]),
        ("unreleased_1_feature", &[]),
    ]);
    let err = converge(&inputs("1.1", log, "1.1.0", &[])).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"can't compute the version after 1.1.18446744073709551615");
}

#[test]
fn test_converge_minor_overflow() {
    let log = changelog(&[
        ("1.18446744073709551615", &[]),
        ("1.18446744073709551615.0", &[1]),
        ("unreleased_1_feature", &[2]),
    ]);
    let err = converge(&inputs("main", log, "1.0.0", &[])).unwrap_err();
    assert!(matches!(
        err,
        ReleaseError::VersionOverflow { version } if version == "1.18446744073709551615.0"
    ));
}

#[test]
fn test_converge_state_records_inputs() {
    let (_, state) = converge(&inputs("1.1", unreleased_bugs(), "1.1.1", &["1.1.1", "1.1.0"])).unwrap();

    assert_eq!(state.branch, "1.1");
    assert_eq!(state.latest_line_release, Some(Version::new(1, 1, 1)));
    assert_eq!(state.next_version, Version::new(1, 1, 2));
    assert_eq!(state.unreleased_issues.len(), 2);
    assert_eq!(state.current_version, Version::new(1, 1, 1));
    assert_eq!(
        state.tags,
        vec![Version::new(1, 1, 0), Version::new(1, 1, 1)]
    );
}

// --- helpers ---

#[test]
fn test_semver_tags_skips_non_release_tags() {
    let tags: Vec<String> = ["2.0.0", "latest", "1.0.0", "1.0", "v3.0.0"]
        .map(String::from)
        .to_vec();
    assert_eq!(
        semver_tags(&tags),
        vec![Version::new(1, 0, 0), Version::new(2, 0, 0)]
    );
}

#[test]
fn test_status_texts() {
    assert_eq!(ChangelogStatus::Okay.text(), "✔ no unreleased issues");
    assert_eq!(ChangelogStatus::NeedsRelease.text(), "✘ needs :release: entry");
    assert_eq!(VersionStatus::Okay.text(), "✔ version up to date");
    assert_eq!(VersionStatus::NeedsBump.text(), "✘ needs version bump");
    assert_eq!(TagStatus::Okay.text(), "✔ all set");
    assert_eq!(TagStatus::NeedsCutting.text(), "✘ needs cutting");
}

#[test]
fn test_status_table() {
    let actions = actions("1.1", unreleased_bugs(), "1.1.1", &[]);
    let rule = format!("{}  {}", "-".repeat(9), "-".repeat(23));
    let expected = [
        rule.as_str(),
        "Changelog  ✘ needs :release: entry",
        "Version    ✘ needs version bump",
        "Tag        ✘ needs cutting",
        rule.as_str(),
    ]
    .join("\n");
    assert_eq!(status_table(&actions), expected);
}

#[test]
fn test_actions_serialize() {
    let actions = actions("1.1", no_unreleased_bugs(), "1.1.2", &["1.1.2"]);
    insta::assert_snapshot!(
        serde_json::to_string(&actions).unwrap(),
        @r#"{"changelog":"okay","version":"okay","tag":"okay","all_okay":true}"#
    );
}

// --- gather ---

fn release_project(branch: &str) -> tempfile::TempDir {
    let temp = tempfile::tempdir().unwrap();
    crate::git::tests::init_test_repo_with_commit(temp.path(), branch).unwrap();
    temp
}

#[test]
fn test_gather_reads_project_state() {
    let temp = release_project("1.1");
    let root = temp.path();
    std::fs::create_dir_all(root.join("docs")).unwrap();
    std::fs::write(
        root.join("docs/changelog.rst"),
        "* :bug:`3` Pending fix.\n* :release:`1.1.0 <2024-01-01>`\n",
    )
    .unwrap();
    std::fs::create_dir_all(root.join("pkg")).unwrap();
    std::fs::write(root.join("pkg/__init__.py"), "").unwrap();
    std::fs::write(root.join("pkg/_version.py"), "__version__ = \"1.1.0\"\n").unwrap();
    crate::git::cmd::tag_annotated(root, "1.1.0", "").unwrap();

    let inputs = super::gather(root, &crate::config::Config::default()).unwrap();
    assert_eq!(inputs.branch, "1.1");
    assert_eq!(inputs.current_version, "1.1.0");
    assert_eq!(inputs.tags, ["1.1.0"]);

    let (actions, state) = converge(&inputs).unwrap();
    assert_eq!(state.expected_version, Version::new(1, 1, 1));
    assert_eq!(actions.changelog, ChangelogStatus::NeedsRelease);
    assert_eq!(actions.version, VersionStatus::NeedsBump);
    assert_eq!(actions.tag, TagStatus::NeedsCutting);
}

#[test]
fn test_gather_rejects_topic_branch_before_reading_files() {
    // No changelog or package exists; the branch check must fail first.
    let temp = release_project("topic");

    let err = super::gather(temp.path(), &crate::config::Config::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReleaseError>(),
        Some(ReleaseError::UndefinedReleaseType { branch }) if branch == "topic"
    ));
}
