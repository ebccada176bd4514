// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child() / run_child_with_cancellation()
//!   stdin task (optional)
//!   stdout/stderr reader tasks
//!   mpsc channels buffer lines
//!   wait (or cancel)
//!   --> ProcessOutput { stdout, stderr, exit_code, interrupted }
//! ```

use crate::error::Result;
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StdinSource, StreamFlags};

/// Spawns a reader task for a child stream if its flags need one.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
    tx: mpsc::UnboundedSender<String>,
) -> Option<JoinHandle<()>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    let name = process_name.to_string();
    stream.map(|stream| {
        tokio::spawn(async move {
            read_stream(stream, flags, &name, stream_name, tx).await;
        })
    })
}

/// Collects output from a channel into a string.
fn collect_output(rx: &mut mpsc::UnboundedReceiver<String>, flags: StreamFlags) -> String {
    if !flags.contains(StreamFlags::KEEP_IN_STRING) {
        return String::new();
    }
    let mut output = String::new();
    while let Ok(line) = rx.try_recv() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line);
    }
    output
}

/// Waits for reader tasks to complete.
async fn await_readers(
    stdout_handle: Option<JoinHandle<()>>,
    stderr_handle: Option<JoinHandle<()>>,
) {
    if let Some(handle) = stdout_handle {
        let _ = handle.await;
    }
    if let Some(handle) = stderr_handle {
        let _ = handle.await;
    }
}

struct Readers {
    stdout_rx: mpsc::UnboundedReceiver<String>,
    stderr_rx: mpsc::UnboundedReceiver<String>,
    stdout_handle: Option<JoinHandle<()>>,
    stderr_handle: Option<JoinHandle<()>>,
}

impl ProcessBuilder {
    fn start_readers(&self, name: &str, child: &mut Child) -> Readers {
        let (stdout_tx, stdout_rx) = mpsc::unbounded_channel::<String>();
        let (stderr_tx, stderr_rx) = mpsc::unbounded_channel::<String>();

        let stdout_handle = spawn_reader(
            child.stdout.take(),
            self.stdout_config(),
            name,
            "stdout",
            stdout_tx,
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            self.stderr_config(),
            name,
            "stderr",
            stderr_tx,
        );

        Readers {
            stdout_rx,
            stderr_rx,
            stdout_handle,
            stderr_handle,
        }
    }

    async fn finish(
        &self,
        mut readers: Readers,
        exit_code: i32,
        interrupted: bool,
    ) -> ProcessOutput {
        await_readers(readers.stdout_handle.take(), readers.stderr_handle.take()).await;

        ProcessOutput::new(
            exit_code,
            collect_output(&mut readers.stdout_rx, self.stdout_config()),
            collect_output(&mut readers.stderr_rx, self.stderr_config()),
            interrupted,
        )
    }

    /// Runs the child process, handling I/O streaming and waiting for completion.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        let readers = self.start_readers(name, child);

        self.write_stdin(name, child).await?;

        let exit_status = child.wait().await?;

        Ok(self
            .finish(readers, exit_status.code().unwrap_or(-1), false)
            .await)
    }

    /// Runs the child process with cancellation support.
    pub(super) async fn run_child_with_cancellation(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        let readers = self.start_readers(name, child);

        self.write_stdin(name, child).await?;

        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "Cancellation requested, terminating process");
                child.kill().await.ok();
                let status = child.wait().await
                    .with_context(|| format!("failed waiting for process {name} to exit"))?;
                (status, true)
            }
        };

        Ok(self
            .finish(readers, exit_status.code().unwrap_or(-1), interrupted)
            .await)
    }

    /// Writes stdin content to the child process if configured.
    async fn write_stdin(&self, name: &str, child: &mut Child) -> Result<()> {
        if let StdinSource::Content(stdin_content) = self.stdin_source()
            && let Some(mut stdin) = child.stdin.take()
        {
            use tokio::io::AsyncWriteExt;
            stdin
                .write_all(stdin_content.as_bytes())
                .await
                .with_context(|| format!("failed to write to stdin for process {name}"))?;
            // Dropping closes the pipe so readers like `gpg --passphrase-fd=0` see EOF
            drop(stdin);
        }
        Ok(())
    }
}

/// Reads from a stream and processes lines.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
    tx: mpsc::UnboundedSender<String>,
) where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = %stream_name, line = %line, "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    let _ = tx.send(line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }
}
