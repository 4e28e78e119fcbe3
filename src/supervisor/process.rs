//! Child process lifecycle: spawn, relay, wait.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncWrite, Stdout};
use tokio::process::Command;

use crate::supervisor::command::CommandSpec;
use crate::supervisor::relay::relay_lines;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("no command to run")]
    NoCommand,

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    Exited { program: String, status: ExitStatus },

    #[error("failed relaying output of {program}: {source}")]
    Relay {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl SupervisorError {
    /// Process exit code that reflects this failure.
    ///
    /// A child's own exit code is mirrored, death by signal `n` maps to
    /// `128 + n`, everything else is `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            SupervisorError::Exited { status, .. } => status_code(status),
            _ => 1,
        }
    }
}

fn status_code(status: &ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(1);
        }
    }

    1
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy)]
pub struct ExitOutcome {
    pub status: ExitStatus,
    /// Lines copied from the child's stdout to the sink.
    pub lines_relayed: u64,
}

/// How long the relay may keep draining after the child has exited.
///
/// A grandchild that inherited the stdout pipe keeps it open past the
/// child's exit; once this window closes the relay is abandoned.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Runs one child process and relays its stdout to a sink.
#[derive(Debug)]
pub struct Supervisor<W = Stdout> {
    sink: W,
    drain_grace: Duration,
}

impl Supervisor<Stdout> {
    /// Supervisor relaying to this process's stdout.
    pub fn new() -> Self {
        Self::with_sink(tokio::io::stdout())
    }
}

impl Default for Supervisor<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Supervisor<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn with_sink(sink: W) -> Self {
        Self {
            sink,
            drain_grace: DEFAULT_DRAIN_GRACE,
        }
    }

    pub fn with_drain_grace(mut self, grace: Duration) -> Self {
        self.drain_grace = grace;
        self
    }

    /// Spawn `command`, stream its stdout, and block until it exits.
    pub async fn run(self, command: &CommandSpec) -> Result<ExitOutcome, SupervisorError> {
        let program = command.program().ok_or(SupervisorError::NoCommand)?;

        let mut child = Command::new(program)
            .args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| SupervisorError::Launch {
                program: program.to_string(),
                source,
            })?;

        tracing::info!(
            command = %command,
            pid = child.id(),
            "Child process started"
        );

        let drain_grace = self.drain_grace;
        let relayed = Arc::new(AtomicU64::new(0));
        let relay = child.stdout.take().map(|stdout| {
            tokio::spawn(relay_lines(stdout, self.sink, Arc::clone(&relayed)))
        });

        let status = child.wait().await.map_err(|source| SupervisorError::Wait {
            program: program.to_string(),
            source,
        })?;

        if let Some(mut handle) = relay {
            match tokio::time::timeout(drain_grace, &mut handle).await {
                Ok(joined) => joined
                    .map_err(io::Error::other)
                    .and_then(|drained| drained)
                    .map_err(|source| SupervisorError::Relay {
                        program: program.to_string(),
                        source,
                    })?,
                Err(_) => {
                    handle.abort();
                    tracing::warn!(
                        command = %command,
                        grace_ms = drain_grace.as_millis() as u64,
                        "Child stdout still open after exit, abandoning relay"
                    );
                }
            }
        }
        let lines_relayed = relayed.load(Ordering::Relaxed);

        tracing::info!(
            command = %command,
            status = %status,
            lines_relayed,
            "Child process exited"
        );

        if !status.success() {
            return Err(SupervisorError::Exited {
                program: program.to_string(),
                status,
            });
        }

        Ok(ExitOutcome {
            status,
            lines_relayed,
        })
    }
}
