// src/exec/shell.rs

//! Doer that runs its command through the platform shell.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::doer::{Doer, DoerOutcome, OutputSink};
use crate::exec::interpolate::interpolate;
use crate::types::DoerKind;

/// Text appended to the output of a command that exits non-zero.
pub fn failure_message(exit_code: i32) -> String {
    format!("\nCommand failed to run, exited with error code {exit_code}\n")
}

/// Runs `sh -c <command>` (`cmd /C` on Windows) with `%f` interpolated.
#[derive(Debug, Clone)]
pub struct ShellDoer {
    command: String,
}

impl ShellDoer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn run_inner(&self, file_name: &str, output: &OutputSink) -> Result<DoerOutcome> {
        let command = interpolate(&self.command, file_name);
        info!(cmd = %command, file = %file_name, "running shell doer");

        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&command);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&command);
            c
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning shell for command '{command}'"))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes while waiting so neither can fill up and block
        // the child.
        let (status, (), ()) = tokio::join!(
            child.wait(),
            forward_output(stdout, output),
            forward_output(stderr, output),
        );
        let status = status.with_context(|| format!("waiting for command '{command}'"))?;

        let exit_code = status.code().unwrap_or(-1);
        debug!(cmd = %command, exit_code, "shell doer exited");

        if !status.success() {
            let _ = output.send(failure_message(exit_code));
        }

        Ok(DoerOutcome { command, exit_code })
    }
}

/// Forward a pipe to the sink line by line, keeping line endings.
async fn forward_output<R>(pipe: Option<R>, output: &OutputSink)
where
    R: AsyncRead + Unpin,
{
    let Some(pipe) = pipe else {
        return;
    };

    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                // A closed receiver only means nobody is displaying output;
                // keep draining so the child does not block on a full pipe.
                let _ = output.send(String::from_utf8_lossy(&buf).into_owned());
            }
            Err(err) => {
                debug!(error = %err, "stopped reading command output");
                break;
            }
        }
    }
}

impl Doer for ShellDoer {
    fn kind(&self) -> DoerKind {
        DoerKind::Shell
    }

    fn command(&self) -> &str {
        &self.command
    }

    fn run<'a>(
        &'a self,
        file_name: &'a str,
        output: &'a OutputSink,
    ) -> Pin<Box<dyn Future<Output = Result<DoerOutcome>> + Send + 'a>> {
        Box::pin(self.run_inner(file_name, output))
    }
}
