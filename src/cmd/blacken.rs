// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blacken command.

use crate::cli::chores::BlackenArgs;
use crate::cmd::{project_root, tool_context};
use crate::config::Config;
use crate::error::Result;
use crate::tools::Tool;
use crate::tools::blacken::BlackenTool;

/// Formatter configured from command-line flags.
#[must_use]
pub fn blacken_tool(args: &BlackenArgs) -> BlackenTool {
    let mut tool = BlackenTool::new()
        .folders(&args.folders)
        .check(args.check);
    if let Some(line_length) = args.line_length {
        tool = tool.line_length(line_length);
    }
    tool
}

/// Runs black over the project's Python sources.
///
/// # Errors
///
/// Returns an error if the sources cannot be scanned or black fails.
pub async fn run_blacken_command(args: &BlackenArgs, config: &Config) -> Result<()> {
    blacken_tool(args)
        .root(project_root()?)
        .run(&tool_context(config))
        .await
}
