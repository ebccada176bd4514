// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test runner tool.
//!
//! ```text
//! pytest [--verbose] [--color=yes] --capture=<c> [opts...] [-k <expr>] [-x]
//!        [--disable-warnings] [tests/<module>.py]
//!
//! Suite::Integration  opts += integration/[<module>.py]
//! coverage(report)    opts += --cov --no-cov-on-fail --cov-report=<report>
//! ```
//!
//! `-k`, `-x` and `--disable-warnings` are not repeated when already present
//! in the extra options.

use crate::error::Result;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext, execute};
use crate::core::process::builder::ProcessBuilder;
use crate::utility::shell::split_words;

/// Which test tree to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Suite {
    /// `tests/`, pytest's own discovery.
    #[default]
    Unit,
    /// `integration/`.
    Integration,
}

#[derive(Debug, Clone)]
pub struct PytestTool {
    verbose: bool,
    color: bool,
    capture: String,
    module: Option<String>,
    k: Option<String>,
    x: bool,
    opts: Vec<String>,
    warnings: bool,
    suite: Suite,
    coverage: Option<String>,
}

impl PytestTool {
    #[must_use]
    pub fn new() -> Self {
        Self {
            verbose: true,
            color: true,
            capture: "sys".to_string(),
            module: None,
            k: None,
            x: false,
            opts: Vec::new(),
            warnings: true,
            suite: Suite::Unit,
            coverage: None,
        }
    }

    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub const fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// pytest capture mode; `sys` keeps subprocess PTY detection working.
    #[must_use]
    pub fn capture(mut self, capture: impl Into<String>) -> Self {
        self.capture = capture.into();
        self
    }

    /// Focus on a single module, e.g. `main` for `tests/main.py`.
    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// `-k` test selection expression.
    #[must_use]
    pub fn k(mut self, expr: impl Into<String>) -> Self {
        self.k = Some(expr.into());
        self
    }

    /// Fail fast.
    #[must_use]
    pub const fn x(mut self, x: bool) -> Self {
        self.x = x;
        self
    }

    /// Extra options, split like a shell command line.
    ///
    /// # Errors
    ///
    /// Returns an error if `opts` has unbalanced quotes.
    pub fn opts(mut self, opts: &str) -> Result<Self> {
        self.opts.extend(split_words(opts)?);
        Ok(self)
    }

    /// `false` passes `--disable-warnings`.
    #[must_use]
    pub const fn warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    #[must_use]
    pub const fn suite(mut self, suite: Suite) -> Self {
        self.suite = suite;
        self
    }

    /// Enables pytest-cov with the given report style.
    #[must_use]
    pub fn coverage(mut self, report: impl Into<String>) -> Self {
        self.coverage = Some(report.into());
        self
    }

    /// Coverage report style, if coverage is enabled.
    #[must_use]
    pub fn coverage_report(&self) -> Option<&str> {
        self.coverage.as_deref()
    }

    fn has_opt(&self, flag: &str) -> bool {
        self.opts.iter().any(|o| o == flag || o.starts_with(flag))
    }

    /// Extra options after the suite and coverage additions.
    fn effective_opts(&self) -> Vec<String> {
        let mut opts = self.opts.clone();
        if let Some(ref report) = self.coverage {
            opts.extend([
                "--cov".to_string(),
                "--no-cov-on-fail".to_string(),
                format!("--cov-report={report}"),
            ]);
        }
        if self.suite == Suite::Integration {
            opts.push(self.module.as_ref().map_or_else(
                || "integration/".to_string(),
                |module| format!("integration/{module}.py"),
            ));
        }
        opts
    }

    /// The pytest invocation.
    #[must_use]
    pub fn command(&self, ctx: &ToolContext) -> ProcessBuilder {
        let mut builder = ProcessBuilder::new(&ctx.config().tools.pytest);
        if self.verbose {
            builder = builder.arg("--verbose");
        }
        if self.color {
            builder = builder.arg("--color=yes");
        }
        builder = builder
            .arg(format!("--capture={}", self.capture))
            .args(self.effective_opts());

        if let Some(ref k) = self.k
            && !self.has_opt("-k")
        {
            builder = builder.arg("-k").arg(k);
        }
        if self.x && !self.has_opt("-x") {
            builder = builder.arg("-x");
        }
        if !self.warnings && !self.has_opt("--disable-warnings") {
            builder = builder.arg("--disable-warnings");
        }
        if self.suite == Suite::Unit
            && let Some(ref module) = self.module
        {
            builder = builder.arg(format!("tests/{module}.py"));
        }
        builder.inherit_stdio()
    }

    async fn do_test(&self, ctx: &ToolContext) -> Result<()> {
        execute(ctx, self.command(ctx), "run the test suite").await?;
        if !ctx.is_dry_run() {
            info!(suite = ?self.suite, "Test suite passed");
        }
        Ok(())
    }
}

impl Default for PytestTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for PytestTool {
    fn name(&self) -> &'static str {
        "pytest"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_test(ctx))
    }
}

#[cfg(test)]
mod tests;
