// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for tool tests.
//!
//! Captures tracing output so dry-run messages can be asserted on.

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use super::ToolContext;
use crate::config::Config;

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs an async closure while capturing tracing output.
///
/// Returns the captured log output as a string.
pub(crate) async fn run_with_logs<F, Fut>(f: F) -> Result<String>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    f().await?;

    let guard = buffer
        .lock()
        .map_err(|_| anyhow::anyhow!("log buffer poisoned"))?;
    Ok(String::from_utf8_lossy(&guard).to_string())
}

/// Context over default config with a fresh cancellation token.
pub(crate) fn context(dry_run: bool) -> ToolContext {
    context_with(Config::default(), dry_run)
}

/// Context over `config` with a fresh cancellation token.
pub(crate) fn context_with(config: Config, dry_run: bool) -> ToolContext {
    ToolContext::new(Arc::new(config), CancellationToken::new(), dry_run)
}
