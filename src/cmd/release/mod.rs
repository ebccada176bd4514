// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release command: status, prepare, and the packaging steps after them.
//!
//! ```text
//! status  --> gather --> converge --> table | JSON
//! prepare --> status --> confirm --> $EDITOR changelog/version
//!                                --> commit "Cut X" + tag X
//!                                --> status again (must be all okay)
//! all     --> prepare --> publish --> push
//! ```

use std::io;
use std::path::Path;

use crate::error::{ReleaseError, Result};
use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::release::{ReleaseArgs, ReleaseCommand};
use crate::cmd::packaging::{self, effective_packaging};
use crate::cmd::{project_root, tool_context};
use crate::config::Config;
use crate::git::cmd::{commit_all, tag_annotated};
use crate::git::query::has_tracked_changes;
use crate::release::{
    Actions, ChangelogStatus, ReleaseState, TagStatus, VersionStatus, converge, gather,
    status_table, version,
};
use crate::tools::editor::EditorTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::console::confirm;

/// Main handler for the release command.
///
/// # Errors
///
/// Returns an error if the selected release or packaging step fails.
pub async fn run_release_command(args: &ReleaseArgs, config: &Config) -> Result<()> {
    let root = project_root()?;
    let ctx = tool_context(config);

    match &args.command {
        ReleaseCommand::Status(status_args) => {
            let (actions, state) = status(&root, config)?;
            println!("{}", render_status(&actions, &state, status_args.json)?);
            Ok(())
        }
        ReleaseCommand::Prepare => prepare(&root, &ctx, ask).await,
        ReleaseCommand::Build(packaging_args) => {
            let settings = effective_packaging(config, &packaging_args.to_override());
            packaging::build(&ctx, &settings, settings.directory.as_deref()).await
        }
        ReleaseCommand::Publish(packaging_args) => {
            let settings = effective_packaging(config, &packaging_args.to_override());
            packaging::publish(&ctx, &settings).await
        }
        ReleaseCommand::Upload(upload_args) => {
            let settings = effective_packaging(config, &upload_args.to_override());
            let directory = settings.directory.clone().unwrap_or_else(|| root.clone());
            packaging::upload(&ctx, &directory, settings.index.as_deref(), settings.sign).await
        }
        ReleaseCommand::TestInstall(dir_args) => {
            let directory = dir_args.directory.clone().unwrap_or_else(|| root.clone());
            packaging::test_install(&ctx, &directory).await
        }
        ReleaseCommand::Push => packaging::push(&ctx, &root).await,
        ReleaseCommand::All(packaging_args) => {
            let settings = effective_packaging(config, &packaging_args.to_override());
            prepare(&root, &ctx, ask).await?;
            packaging::publish(&ctx, &settings).await?;
            packaging::push(&ctx, &root).await
        }
    }
}

fn ask(question: &str) -> io::Result<bool> {
    confirm(question, true)
}

/// Gathers project state at `root` and converges it.
///
/// # Errors
///
/// Returns an error if inputs cannot be gathered or convergence fails.
pub fn status(root: &Path, config: &Config) -> Result<(Actions, ReleaseState)> {
    let inputs = gather(root, config)?;
    Ok(converge(&inputs)?)
}

#[derive(Serialize)]
struct StatusReport<'a> {
    branch: &'a str,
    release_type: String,
    current_version: String,
    expected_version: String,
    actions: &'a Actions,
}

/// Renders the status table, or JSON when asked.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_status(actions: &Actions, state: &ReleaseState, json: bool) -> Result<String> {
    if json {
        let report = StatusReport {
            branch: &state.branch,
            release_type: state.release_type.to_string(),
            current_version: state.current_version.to_string(),
            expected_version: state.expected_version.to_string(),
            actions,
        };
        return serde_json::to_string_pretty(&report).context("Failed to serialize status");
    }
    Ok(status_table(actions))
}

fn is_undefined_branch(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<ReleaseError>(),
        Some(ReleaseError::UndefinedReleaseType { .. })
    )
}

/// Brings the changelog, version file and tag in line with the expected
/// version.
///
/// `ask` answers the confirmation prompt unless dry-running or
/// `global.assume_yes` is set.
///
/// # Errors
///
/// Returns `ReleaseError::Aborted` when the user declines,
/// `ReleaseError::Unconverged` when the follow-up check still finds work, and
/// any error from gathering state, editing, committing or tagging.
pub async fn prepare<F>(root: &Path, ctx: &ToolContext, ask: F) -> Result<()>
where
    F: FnOnce(&str) -> io::Result<bool>,
{
    let config = ctx.config();
    let dry_run = ctx.is_dry_run();

    let (actions, state) = match status(root, config) {
        Ok(found) => found,
        Err(e) if dry_run && is_undefined_branch(&e) => {
            warn!("Can't dry-run release tasks, not on a release branch; skipping.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("{}", status_table(&actions));
    if actions.all_okay {
        info!(version = %state.expected_version, "Release state already converged");
        return Ok(());
    }

    if !dry_run
        && !config.global.assume_yes
        && !ask("Take the above actions?").context("No answer given; nothing was changed")?
    {
        return Err(ReleaseError::Aborted.into());
    }

    if actions.changelog == ChangelogStatus::NeedsRelease {
        EditorTool::new()
            .file(root.join(&config.packaging.changelog_file))
            .run(ctx)
            .await?;
    }

    if actions.version == VersionStatus::NeedsBump {
        let package = version::find_package(root, config.packaging.package.as_deref())?;
        EditorTool::new()
            .file(version::version_file(
                root,
                &package,
                &config.packaging.version_module,
            ))
            .run(ctx)
            .await?;
    }

    if actions.tag == TagStatus::NeedsCutting {
        cut_tag(root, &state.expected_version.to_string(), dry_run)?;
    }

    if dry_run {
        return Ok(());
    }

    let (actions, _) = status(root, config)?;
    if !actions.all_okay {
        return Err(ReleaseError::Unconverged.into());
    }
    info!(version = %state.expected_version, "Release prepared");
    Ok(())
}

/// Commits tracked changes (if any) so the tag covers them, then tags.
fn cut_tag(root: &Path, version: &str, dry_run: bool) -> Result<()> {
    let message = format!("Cut {version}");
    if dry_run {
        info!(commit = %message, "[dry-run] Would commit tracked changes");
        info!(tag = version, "[dry-run] Would create annotated tag");
        return Ok(());
    }

    // Untracked files are deliberately left out of the release commit.
    if has_tracked_changes(root)? {
        commit_all(root, &message)?;
        info!(commit = %message, "Committed");
    }
    tag_annotated(root, version, "")?;
    info!(tag = version, "Tagged");
    Ok(())
}
