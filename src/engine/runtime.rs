// src/engine/runtime.rs

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::errors::{Result, WatchdoError};
use crate::exec::{DoerManager, DoerOutcome};
use crate::fs::FileSystem;
use crate::watch::{GlobManager, WatcherManager};

use super::banner::{build_footer, build_header, CLEAR_SCREEN};
use super::{select_dispatch_targets, CycleReport, RuntimeOptions};

/// The polling loop: detect changes, run the doers, sleep, repeat.
///
/// Doer output and banners go to `output` (stdout in production); logs go
/// through `tracing`.
pub struct Runtime<W: Write> {
    watchers: WatcherManager,
    doers: DoerManager,
    options: RuntimeOptions,
    output: W,
}

impl<W: Write> fmt::Debug for Runtime<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("watchers", &self.watchers)
            .field("doers", &self.doers)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Runtime<W> {
    pub fn new(
        watchers: WatcherManager,
        doers: DoerManager,
        options: RuntimeOptions,
        output: W,
    ) -> Self {
        Self {
            watchers,
            doers,
            options,
            output,
        }
    }

    /// Wire up globbing, watchers and doers from validated settings.
    pub fn from_settings(
        settings: &Settings,
        fs: Arc<dyn FileSystem>,
        output: W,
    ) -> Result<Self> {
        let glob_manager =
            GlobManager::with_fs(Arc::clone(&fs), settings.globs().iter().cloned())?;
        let watchers = WatcherManager::new(
            fs,
            settings.method(),
            glob_manager,
            settings.reglob(),
            settings.run_on_remove(),
        );
        let doers =
            DoerManager::new(settings.commands().iter().cloned(), settings.default_doer())?;

        Ok(Self::new(
            watchers,
            doers,
            RuntimeOptions::from_settings(settings),
            output,
        ))
    }

    pub fn watchers(&self) -> &WatcherManager {
        &self.watchers
    }

    pub fn doers(&self) -> &DoerManager {
        &self.doers
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// First polling cycle: start watching and print the header.
    ///
    /// Fails with [`WatchdoError::NoFiles`] if the globs match nothing.
    pub fn start(&mut self) -> Result<()> {
        // The first call never reports changes; it only creates the watchers.
        self.watchers.get_changed_files()?;

        let count = self.watchers.files().len();
        if count == 0 {
            return Err(WatchdoError::NoFiles);
        }
        info!(files = count, method = %self.watchers.method(), "watching files");

        if !self.options.disable_banners {
            if !self.options.disable_clear {
                self.output.write_all(CLEAR_SCREEN.as_bytes())?;
            }
            self.write_header()?;
            self.output.flush()?;
        }

        Ok(())
    }

    /// One polling cycle (without the trailing interval sleep).
    pub async fn cycle(&mut self) -> Result<CycleReport> {
        let mut changed = match self.watchers.get_changed_files() {
            Ok(changed) => changed,
            Err(WatchdoError::FileNotFound { path }) => {
                warn!(
                    file = ?path,
                    "file was not found, will check again in {:.2} seconds",
                    self.options.interval.as_secs_f64()
                );
                return Ok(CycleReport::default());
            }
            Err(err) => return Err(err),
        };

        if changed.is_empty() {
            return Ok(CycleReport::default());
        }

        let trigger_time = SystemTime::now();
        info!(files = ?changed, "detected changes");

        if !self.options.wait_time.is_zero() {
            tokio::time::sleep(self.options.wait_time).await;
            // Absorb changes made during the wait so they don't trigger
            // a second run on the next cycle.
            match self.watchers.get_changed_files() {
                Ok(more) => changed.extend(more),
                Err(err) => debug!(error = %err, "re-check after wait time failed"),
            }
        }

        if !self.options.disable_clear {
            self.output.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        if !self.options.disable_banners {
            self.write_header()?;
        }
        self.output.flush()?;

        let started = Instant::now();
        let dispatched = select_dispatch_targets(&changed, self.options.multi);

        let mut outcomes = Vec::new();
        for file in &dispatched {
            outcomes.extend(self.dispatch(file).await?);
        }

        if !self.options.disable_banners {
            let causes: Vec<String> = changed
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            let footer = build_footer(trigger_time, &causes, started.elapsed());
            self.output.write_all(footer.as_bytes())?;
            self.output.flush()?;
        }

        Ok(CycleReport {
            changed,
            dispatched,
            outcomes,
        })
    }

    /// Run the doers for one file, copying their output to `self.output` as
    /// it arrives.
    async fn dispatch(&mut self, file: &Path) -> Result<Vec<DoerOutcome>> {
        let file_name = file.to_string_lossy().into_owned();
        debug!(file = %file_name, "dispatching doers");

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let output = &mut self.output;

        let run = self.doers.run_doers(&file_name, tx);
        let print = async {
            let mut result: io::Result<()> = Ok(());
            // Keep receiving after a write error so the doers never stall.
            while let Some(chunk) = rx.recv().await {
                if result.is_ok() {
                    result = output
                        .write_all(chunk.as_bytes())
                        .and_then(|()| output.flush());
                }
            }
            result
        };

        let (outcomes, printed) = tokio::join!(run, print);
        printed?;
        outcomes
    }

    fn write_header(&mut self) -> io::Result<()> {
        let header = build_header(
            self.watchers.glob_manager().last_files().len(),
            self.watchers.method(),
        );
        self.output.write_all(header.as_bytes())
    }

    /// Poll until Ctrl-C.
    ///
    /// Errors from individual cycles are logged and the loop carries on; only
    /// a failing [`start`](Self::start) ends it early.
    pub async fn run(mut self) -> Result<()> {
        self.start()?;

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("interrupt received; shutting down");
                    break;
                }
                () = self.cycle_then_sleep() => {}
            }
        }

        Ok(())
    }

    async fn cycle_then_sleep(&mut self) {
        match self.cycle().await {
            Ok(report) if !report.dispatched.is_empty() => {
                debug!(
                    dispatched = report.dispatched.len(),
                    failed = report.outcomes.iter().filter(|o| !o.success()).count(),
                    "cycle finished"
                );
            }
            Ok(_) => {}
            Err(err) => error!(error = %err, "polling cycle failed"),
        }
        tokio::time::sleep(self.options.interval).await;
    }
}
