// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn() --> run_child
//!              |
//!              v
//!    validate exit_code
//!    (skip if ALLOW_FAILURE)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr }
//! ```

use crate::error::{ProcessError, Result};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StdinSource, StreamFlags};

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// This is the main entry point for executing a process.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The executable cannot be found or spawned.
    /// - The process exits with a code outside the success set (and `ALLOW_FAILURE` is not set).
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let mut child = self.spawn_logged(&name)?;

        let output = self.run_child(&name, &mut child).await?;

        self.check_exit(&name, &output)?;
        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// Similar to `run()`, but accepts a `CancellationToken` that can be used
    /// to interrupt the process. When the token is cancelled the child is
    /// killed and the output comes back with `interrupted = true`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The executable cannot be found or spawned.
    /// - The process exits with a code outside the success set (and `ALLOW_FAILURE`
    ///   is not set, and the process was not interrupted).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tokio_util::sync::CancellationToken;
    /// use chores_rs::core::process::builder::ProcessBuilder;
    ///
    /// let token = CancellationToken::new();
    /// let output = ProcessBuilder::new("pytest")
    ///     .arg("--verbose")
    ///     .run_with_cancellation(token)
    ///     .await?;
    /// ```
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();

        // Check if already cancelled before spawning
        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), String::new(), true));
        }

        let mut child = self.spawn_logged(&name)?;

        let output = self
            .run_child_with_cancellation(&name, &mut child, token)
            .await?;

        if !output.is_interrupted() {
            self.check_exit(&name, &output)?;
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    fn spawn_logged(&self, name: &str) -> Result<Child> {
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let child = self.build_command().spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source,
                }
            }
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");
        Ok(child)
    }

    fn check_exit(&self, name: &str, output: &ProcessOutput) -> Result<()> {
        if self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            || self.success_code_set().contains(&output.exit_code())
        {
            return Ok(());
        }
        if !output.stderr().is_empty() {
            error!(process = %name, stderr = %output.stderr(), "process error output");
        }
        Err(ProcessError::NonZeroExit {
            command: name.to_string(),
            code: output.exit_code(),
        }
        .into())
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        // Arguments
        command.args(self.get_args());

        // Working directory
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        // Environment
        command.envs(self.environment());

        // Stdin
        command.stdin(match self.stdin_source() {
            StdinSource::Null => Stdio::null(),
            StdinSource::Content(_) => Stdio::piped(),
            StdinSource::Inherit => Stdio::inherit(),
        });

        // Stdout
        command.stdout(Self::stdio_from_flags(self.stdout_config()));

        // Stderr
        command.stderr(Self::stdio_from_flags(self.stderr_config()));

        // Kill on drop for safety
        command.kill_on_drop(true);

        command
    }

    /// Converts `StreamFlags` to Stdio configuration.
    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}
