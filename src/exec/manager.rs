// src/exec/manager.rs

//! Parses `--do` commands into doers and runs them.

use std::fmt;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::exec::doer::{Doer, DoerOutcome, OutputSink};
use crate::types::DoerKind;

/// Separates an explicit doer kind from the command: `shell::make test`.
pub const DOER_TOKEN: &str = "::";

/// Split a raw command into its doer kind and command template.
///
/// Without a `kind::` prefix the whole string is the template and
/// `default_doer` is used. Only the first `::` separates, so a template that
/// itself contains `::` needs an explicit prefix.
pub fn parse_command(raw: &str, default_doer: DoerKind) -> Result<(DoerKind, String)> {
    match raw.split_once(DOER_TOKEN) {
        Some((tag, command)) => Ok((DoerKind::from_tag(tag)?, command.to_string())),
        None => Ok((default_doer, raw.to_string())),
    }
}

/// Owns the doers built from the user's commands, in declaration order.
pub struct DoerManager {
    commands: Vec<String>,
    default_doer: DoerKind,
    doers: Vec<Box<dyn Doer>>,
}

impl fmt::Debug for DoerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoerManager")
            .field("commands", &self.commands)
            .field("default_doer", &self.default_doer)
            .finish_non_exhaustive()
    }
}

impl DoerManager {
    /// Parse every command and build its doer.
    ///
    /// Fails with [`UnknownDoer`](crate::errors::WatchdoError::UnknownDoer)
    /// if any `kind::` prefix does not name a registered doer.
    pub fn new<I, S>(commands: I, default_doer: DoerKind) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let commands: Vec<String> = commands.into_iter().map(Into::into).collect();

        let doers = commands
            .iter()
            .map(|raw| {
                let (kind, command) = parse_command(raw, default_doer)?;
                debug!(%kind, %command, "parsed doer");
                Ok(kind.build(command))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            commands,
            default_doer,
            doers,
        })
    }

    /// The raw commands, as given.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn default_doer(&self) -> DoerKind {
        self.default_doer
    }

    pub fn doers(&self) -> &[Box<dyn Doer>] {
        &self.doers
    }

    /// Run every doer against `file_name`, one after another.
    ///
    /// A doer that exits non-zero does not stop the ones after it; its
    /// failure shows up in `output` and in the returned outcomes. The sink
    /// is dropped when this returns, which ends the receiver's stream.
    pub async fn run_doers(&self, file_name: &str, output: OutputSink) -> Result<Vec<DoerOutcome>> {
        let mut outcomes = Vec::with_capacity(self.doers.len());

        for doer in &self.doers {
            let outcome = doer.run(file_name, &output).await?;
            if !outcome.success() {
                warn!(
                    cmd = %outcome.command,
                    exit_code = outcome.exit_code,
                    "doer failed"
                );
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
