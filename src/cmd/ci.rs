// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CI host helpers.

use crate::cli::chores::{CiArgs, CiCommand};
use crate::cmd::tool_context;
use crate::config::Config;
use crate::error::Result;
use crate::tools::Tool;
use crate::tools::sudo::SudoTool;

/// Sudo tool for a `ci` subcommand.
#[must_use]
pub fn sudo_tool(command: &CiCommand) -> SudoTool {
    match command {
        CiCommand::MakeSudouser => SudoTool::new().make_user_op(),
        CiCommand::SudoRun { command } => SudoTool::new().command(command.join(" ")).run_op(),
        CiCommand::MakeSshable => SudoTool::new().make_sshable_op(),
    }
}

/// Main handler for the ci command.
///
/// # Errors
///
/// Returns an error if a sudo step fails.
pub async fn run_ci_command(args: &CiArgs, config: &Config) -> Result<()> {
    sudo_tool(&args.command).run(&tool_context(config)).await
}

#[cfg(test)]
mod tests {
    use super::sudo_tool;
    use crate::cli::chores::CiCommand;
    use crate::tools::test_utils::context;

    #[test]
    fn test_sudo_run_joins_command() {
        let tool = sudo_tool(&CiCommand::SudoRun {
            command: vec!["pytest".to_string(), "-x".to_string()],
        })
        .path_env("/usr/bin");

        let cmd = tool.run_command(&context(false)).unwrap();
        assert_eq!(
            cmd.command_line(),
            "sudo su invoker -c 'export PATH=/usr/bin && pytest -x'"
        );
    }
}
