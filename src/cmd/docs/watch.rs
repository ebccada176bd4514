// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Polling docs watcher.
//!
//! ```text
//! README.rst, sites/www         --> rebuild www
//! sites/docs, <package>/        --> rebuild docs
//! _build/, *.swp                --> ignored
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::tools::sphinx::SphinxTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::walk::{WalkOptions, changed_paths, snapshot};

/// A site and the paths whose edits should rebuild it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub site: String,
    pub roots: Vec<PathBuf>,
}

/// What `docs watch` looks at, relative to `root`.
#[must_use]
pub fn watch_targets(root: &Path, config: &Config) -> Vec<WatchTarget> {
    let www = WatchTarget {
        site: "www".to_string(),
        roots: vec![
            root.join("README.rst"),
            root.join(config.site_config("www").source),
        ],
    };

    let mut docs_roots = vec![root.join(config.site_config("docs").source)];
    if let Some(package) = config.watched_package() {
        docs_roots.push(root.join(package));
    }
    let docs = WatchTarget {
        site: "docs".to_string(),
        roots: docs_roots,
    };

    vec![www, docs]
}

/// Sites with at least one changed path under their roots, in target order.
#[must_use]
pub fn sites_to_rebuild<'a>(targets: &'a [WatchTarget], changed: &[PathBuf]) -> Vec<&'a str> {
    targets
        .iter()
        .filter(|target| {
            changed
                .iter()
                .any(|path| target.roots.iter().any(|root| path.starts_with(root)))
        })
        .map(|target| target.site.as_str())
        .collect()
}

/// Rebuilds sites as their sources change, until cancelled.
///
/// A failed rebuild is logged and watching continues.
///
/// # Errors
///
/// Does not fail once started; it returns `Ok` when cancelled.
pub async fn watch(ctx: &ToolContext, root: &Path, interval: Duration) -> Result<()> {
    let config = ctx.config();
    let targets = watch_targets(root, config);
    let roots: Vec<PathBuf> = targets
        .iter()
        .flat_map(|target| target.roots.iter().cloned())
        .collect();
    let options = WalkOptions::for_docs_watch();

    let mut before = snapshot(&roots, &options);
    info!(files = before.len(), "Watching docs sources; Ctrl+C to stop");

    loop {
        tokio::select! {
            () = ctx.cancel_token().cancelled() => {
                info!("Stopped watching");
                return Ok(());
            }
            () = tokio::time::sleep(interval) => {}
        }

        let after = snapshot(&roots, &options);
        let changed = changed_paths(&before, &after);
        if changed.is_empty() {
            continue;
        }
        debug!(?changed, "Sources changed");

        for site in sites_to_rebuild(&targets, &changed) {
            info!(site, "Rebuilding");
            let result = SphinxTool::new()
                .site(config.site_config(site))
                .build_op()
                .run(ctx)
                .await;
            if let Err(e) = result {
                warn!(site, error = %e, "Rebuild failed");
            }
        }
        before = after;
    }
}
