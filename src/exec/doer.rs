// src/exec/doer.rs

//! The `Doer` abstraction.
//!
//! A doer is bound to one command template and runs it against a triggering
//! file. Output is pushed into an [`OutputSink`] as it is produced; a failing
//! command is reported as text in that stream, not as an `Err`.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::errors::Result;
use crate::exec::shell::ShellDoer;
use crate::types::DoerKind;

/// Receives output chunks (combined stdout/stderr) from running doers.
pub type OutputSink = mpsc::UnboundedSender<String>;

/// What happened when a doer ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoerOutcome {
    /// The command after file-name interpolation.
    pub command: String,
    /// Process exit code; `-1` when the process was killed by a signal.
    pub exit_code: i32,
}

impl DoerOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A runnable action bound to a command template.
///
/// Returns a boxed future (as opposed to an `async fn`) so doers of different
/// kinds can live behind `Box<dyn Doer>` in the same list.
pub trait Doer: Send + Sync {
    fn kind(&self) -> DoerKind;

    /// The raw template, before interpolation.
    fn command(&self) -> &str;

    /// Run against `file_name`, streaming output into `output`.
    ///
    /// Only a failure to run at all (spawn/wait errors) is an `Err`.
    fn run<'a>(
        &'a self,
        file_name: &'a str,
        output: &'a OutputSink,
    ) -> Pin<Box<dyn Future<Output = Result<DoerOutcome>> + Send + 'a>>;
}

impl DoerKind {
    /// Construct the doer registered for this kind.
    pub fn build(self, command: impl Into<String>) -> Box<dyn Doer> {
        match self {
            DoerKind::Shell => Box::new(ShellDoer::new(command)),
        }
    }
}
