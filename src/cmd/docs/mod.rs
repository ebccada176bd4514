// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Documentation commands.
//!
//! ```text
//! docs [--site S] build|clean|browse|doctest|tree --> SphinxTool
//! docs sites  --> every site quietly, then every site nitpicky
//! docs watch  --> poll, rebuild the sites whose sources changed
//! ```

mod watch;

pub use watch::{WatchTarget, sites_to_rebuild, watch, watch_targets};

use std::time::Duration;

use crate::cli::docs::{DocsArgs, DocsBuildArgs, DocsCommand};
use crate::cmd::{project_root, tool_context};
use crate::config::Config;
use crate::error::Result;
use crate::tools::sphinx::SphinxTool;
use crate::tools::{Tool, ToolContext};

/// Main handler for the docs command.
///
/// # Errors
///
/// Returns an error if the selected docs step fails.
pub async fn run_docs_command(args: &DocsArgs, config: &Config) -> Result<()> {
    let ctx = tool_context(config);
    let tool = site_tool(config, args.site.as_deref());

    match &args.command {
        DocsCommand::Build(build_args) => build_tool(tool, build_args)?.run(&ctx).await,
        DocsCommand::Clean => tool.clean_op().run(&ctx).await,
        DocsCommand::Browse => tool.browse_op().run(&ctx).await,
        DocsCommand::Doctest => tool.doctest_op().run(&ctx).await,
        DocsCommand::Tree => tool.tree_op().run(&ctx).await,
        DocsCommand::Sites => sites(&ctx).await,
        DocsCommand::Watch(watch_args) => {
            let root = project_root()?;
            watch(&ctx, &root, Duration::from_secs(watch_args.interval)).await
        }
    }
}

/// Sphinx over `[sphinx]`, or over a named site's layout.
#[must_use]
pub fn site_tool(config: &Config, site: Option<&str>) -> SphinxTool {
    match site {
        Some(name) => SphinxTool::new().site(config.site_config(name)),
        None => SphinxTool::new(),
    }
}

/// Applies `docs build` flags.
///
/// # Errors
///
/// Returns an error if `--opts` has unbalanced quotes.
pub fn build_tool(tool: SphinxTool, args: &DocsBuildArgs) -> Result<SphinxTool> {
    let mut tool = tool
        .clean(args.clean)
        .browse(args.browse)
        .nitpick(args.nitpick);
    if let Some(ref opts) = args.opts {
        tool = tool.opts(opts)?;
    }
    Ok(tool.build_op())
}

/// Builds every site, then builds them all again nitpicky.
///
/// The first pass makes sure each site's intersphinx inventory exists
/// before any site links against another.
///
/// # Errors
///
/// Returns an error if any build fails.
pub async fn sites(ctx: &ToolContext) -> Result<()> {
    let config = ctx.config();
    let names = config.site_names();

    for nitpick in [false, true] {
        for name in &names {
            SphinxTool::new()
                .site(config.site_config(name))
                .quiet(!nitpick)
                .nitpick(nitpick)
                .build_op()
                .run(ctx)
                .await?;
        }
    }
    Ok(())
}
