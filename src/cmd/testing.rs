// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test, integration and coverage commands.

use crate::cli::testing::{CoverageArgs, TestArgs};
use crate::cmd::tool_context;
use crate::config::Config;
use crate::error::Result;
use crate::tools::opener::OpenTool;
use crate::tools::pytest::{PytestTool, Suite};
use crate::tools::{Tool, ToolContext};

/// Where pytest-cov writes its HTML report.
pub const HTML_REPORT: &str = "htmlcov/index.html";

/// pytest configured from command-line flags.
///
/// # Errors
///
/// Returns an error if `--opts` has unbalanced quotes.
pub fn pytest_tool(args: &TestArgs, suite: Suite) -> Result<PytestTool> {
    let mut tool = PytestTool::new()
        .verbose(args.verbose)
        .color(!args.no_color)
        .capture(&args.capture)
        .x(args.x)
        .warnings(args.warnings)
        .suite(suite);
    if let Some(ref module) = args.module {
        tool = tool.module(module);
    }
    if let Some(ref k) = args.k {
        tool = tool.k(k);
    }
    if let Some(ref opts) = args.opts {
        tool = tool.opts(opts)?;
    }
    Ok(tool)
}

/// Runs the unit test suite.
///
/// # Errors
///
/// Returns an error if pytest fails.
pub async fn run_test_command(args: &TestArgs, config: &Config) -> Result<()> {
    pytest_tool(args, Suite::Unit)?
        .run(&tool_context(config))
        .await
}

/// Runs the integration test suite.
///
/// # Errors
///
/// Returns an error if pytest fails.
pub async fn run_integration_command(args: &TestArgs, config: &Config) -> Result<()> {
    pytest_tool(args, Suite::Integration)?
        .run(&tool_context(config))
        .await
}

/// Runs the unit tests under coverage, opening HTML reports.
///
/// # Errors
///
/// Returns an error if pytest fails or the report cannot be opened.
pub async fn run_coverage_command(args: &CoverageArgs, config: &Config) -> Result<()> {
    coverage(&tool_context(config), args).await
}

async fn coverage(ctx: &ToolContext, args: &CoverageArgs) -> Result<()> {
    let test_args = TestArgs {
        opts: args.opts.clone(),
        ..TestArgs::default()
    };
    pytest_tool(&test_args, Suite::Unit)?
        .coverage(&args.report)
        .run(ctx)
        .await?;

    if args.report == "html" {
        OpenTool::new().path(HTML_REPORT).run(ctx).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{coverage, pytest_tool};
    use crate::cli::testing::{CoverageArgs, TestArgs};
    use crate::tools::pytest::Suite;
    use crate::tools::test_utils::{context, run_with_logs};

    #[test]
    fn test_pytest_tool_from_flags() {
        let args = TestArgs {
            verbose: true,
            module: Some("config".to_string()),
            k: Some("parse".to_string()),
            x: true,
            ..TestArgs::default()
        };

        let cmd = pytest_tool(&args, Suite::Unit)
            .unwrap()
            .command(&context(false));
        assert_eq!(
            cmd.command_line(),
            "pytest --verbose --color=yes --capture=sys -k parse -x --disable-warnings tests/config.py"
        );
    }

    #[test]
    fn test_pytest_tool_integration_module() {
        let args = TestArgs {
            no_color: true,
            warnings: true,
            module: Some("release".to_string()),
            ..TestArgs::default()
        };

        let cmd = pytest_tool(&args, Suite::Integration)
            .unwrap()
            .command(&context(false));
        assert_eq!(
            cmd.command_line(),
            "pytest --capture=sys integration/release.py"
        );
    }

    #[tokio::test]
    async fn test_coverage_html_opens_report() -> anyhow::Result<()> {
        let args = CoverageArgs {
            report: "html".to_string(),
            opts: None,
        };

        let logs = run_with_logs(|| async { coverage(&context(true), &args).await }).await?;

        assert!(logs.contains("--cov --no-cov-on-fail --cov-report=html"), "{logs}");
        assert!(logs.contains("open htmlcov/index.html"), "{logs}");
        Ok(())
    }

    #[tokio::test]
    async fn test_coverage_term_does_not_open() -> anyhow::Result<()> {
        let args = CoverageArgs {
            report: "term".to_string(),
            opts: Some("--lf".to_string()),
        };

        let logs = run_with_logs(|| async { coverage(&context(true), &args).await }).await?;

        assert!(logs.contains("--lf --cov"), "{logs}");
        assert!(!logs.contains("Would open file"), "{logs}");
        Ok(())
    }
}
