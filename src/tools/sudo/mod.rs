// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CI helpers around a passworded sudo-capable user.
//!
//! ```text
//! MakeUser     sudo useradd <user> --create-home --groups <group>
//!              sudo chpasswd            (stdin: "<user>:<password>\n")
//! Run          sudo su <user> -c "export PATH=<PATH> && <command>"
//! MakeSshable  sudo -u <user> sh -c "mkdir ~<user>/.ssh"
//!              sudo -u <user> sh -c "chmod 0700 ~<user>/.ssh"
//!              sudo -u <user> sh -c "ssh-keygen -f ~<user>/.ssh/id_rsa -N ''"
//!              sudo -u <user> sh -c "cp ~<user>/.ssh/id_rsa.pub ~<user>/.ssh/authorized_keys"
//! ```
//!
//! Most CI images grant the default user passwordless sudo, which hides
//! bugs in code that has to answer a sudo prompt. Running the suite as this
//! user surfaces them.

use crate::error::Result;
use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::config::types::SudoConfig;
use crate::core::process::builder::ProcessBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SudoOperation {
    #[default]
    MakeUser,
    Run,
    MakeSshable,
}

#[derive(Debug, Clone)]
pub struct SudoTool {
    command: Option<String>,
    path_env: Option<String>,
    operation: SudoOperation,
}

impl SudoTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            command: None,
            path_env: None,
            operation: SudoOperation::MakeUser,
        }
    }

    /// Shell command to run as the CI user.
    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// `PATH` carried into the `su` shell; the current `PATH` when unset.
    #[must_use]
    pub fn path_env(mut self, path: impl Into<String>) -> Self {
        self.path_env = Some(path.into());
        self
    }

    #[must_use]
    pub const fn make_user_op(mut self) -> Self {
        self.operation = SudoOperation::MakeUser;
        self
    }

    #[must_use]
    pub const fn run_op(mut self) -> Self {
        self.operation = SudoOperation::Run;
        self
    }

    #[must_use]
    pub const fn make_sshable_op(mut self) -> Self {
        self.operation = SudoOperation::MakeSshable;
        self
    }

    fn sudo(ctx: &ToolContext) -> ProcessBuilder {
        ProcessBuilder::new(&ctx.config().tools.sudo)
    }

    fn settings(ctx: &ToolContext) -> &SudoConfig {
        &ctx.config().ci.sudo
    }

    /// User creation followed by the non-interactive password change.
    #[must_use]
    pub fn make_user_commands(&self, ctx: &ToolContext) -> [ProcessBuilder; 2] {
        let sudo = Self::settings(ctx);
        [
            Self::sudo(ctx)
                .arg("useradd")
                .arg(&sudo.user)
                .args(["--create-home", "--groups"])
                .arg(&sudo.group),
            Self::sudo(ctx)
                .arg("chpasswd")
                .stdin(format!("{}:{}\n", sudo.user, sudo.password)),
        ]
    }

    /// `su` resets `PATH`, so it is re-exported inside the shell.
    ///
    /// # Errors
    ///
    /// Returns an error if no command was given.
    pub fn run_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let command = self
            .command
            .as_deref()
            .context("SudoTool: command is required")?;
        let path = self
            .path_env
            .clone()
            .unwrap_or_else(|| std::env::var("PATH").unwrap_or_default());

        Ok(Self::sudo(ctx)
            .arg("su")
            .arg(&Self::settings(ctx).user)
            .arg("-c")
            .arg(format!("export PATH={path} && {command}"))
            .inherit_stdio())
    }

    /// Key setup steps, each run through `sh` as the CI user so `~user`
    /// expands.
    #[must_use]
    pub fn make_sshable_commands(&self, ctx: &ToolContext) -> Vec<ProcessBuilder> {
        let user = &Self::settings(ctx).user;
        let ssh_dir = format!("~{user}/.ssh");
        let keygen = ctx.config().tools.ssh_keygen.display().to_string();

        [
            format!("mkdir {ssh_dir}"),
            format!("chmod 0700 {ssh_dir}"),
            format!("{keygen} -f {ssh_dir}/id_rsa -N ''"),
            format!("cp {ssh_dir}/id_rsa.pub {ssh_dir}/authorized_keys"),
        ]
        .into_iter()
        .map(|script| {
            Self::sudo(ctx)
                .args(["-u", user.as_str(), "sh", "-c"])
                .arg(script)
        })
        .collect()
    }

    async fn do_make_user(&self, ctx: &ToolContext) -> Result<()> {
        let [useradd, chpasswd] = self.make_user_commands(ctx);
        execute(ctx, useradd, "create sudo user").await?;
        execute(ctx, chpasswd, "set sudo user password").await?;
        if !ctx.is_dry_run() {
            info!(user = %Self::settings(ctx).user, "Sudo user created");
        }
        Ok(())
    }

    async fn do_run(&self, ctx: &ToolContext) -> Result<()> {
        execute(ctx, self.run_command(ctx)?, "run as sudo user").await?;
        Ok(())
    }

    async fn do_make_sshable(&self, ctx: &ToolContext) -> Result<()> {
        for builder in self.make_sshable_commands(ctx) {
            execute(ctx, builder, "set up ssh access").await?;
        }
        Ok(())
    }
}

impl Default for SudoTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SudoTool {
    fn name(&self) -> &'static str {
        "sudo"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                SudoOperation::MakeUser => self.do_make_user(ctx).await,
                SudoOperation::Run => self.do_run(ctx).await,
                SudoOperation::MakeSshable => self.do_make_sshable(ctx).await,
            }
        })
    }
}
