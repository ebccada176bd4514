// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> tools::* / release::*
//!   release, packaging, testing, docs, blacken, vendorize, ci, config
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::tools::ToolContext;

pub mod blacken;
pub mod ci;
pub mod config;
pub mod docs;
pub mod packaging;
pub mod release;
pub mod testing;
pub mod vendorize;

/// Tool context over `config`, cancelled on Ctrl+C.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn tool_context(config: &Config) -> ToolContext {
    let cancel_token = CancellationToken::new();
    let on_interrupt = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting...");
            on_interrupt.cancel();
        }
    });

    ToolContext::new(Arc::new(config.clone()), cancel_token, config.global.dry)
}

/// The project root chores operate on.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable.
pub fn project_root() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to determine the current directory")
}
