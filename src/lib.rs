// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{resolve_settings, Settings};
use crate::engine::Runtime;
use crate::errors::{Result, WatchdoError};
use crate::exec::DoerManager;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::GlobManager;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (CLI flags over an optional config file)
/// - glob expansion + watchers
/// - doers
/// - the polling runtime, writing doer output to stdout
/// - Ctrl-C handling (inside the runtime)
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    if args.dry_run {
        let mut stdout = std::io::stdout().lock();
        return print_dry_run(&settings, fs, &mut stdout);
    }

    let runtime = Runtime::from_settings(&settings, fs, std::io::stdout())?;
    runtime.run().await
}

/// Dry-run output: settings, matched files and parsed doers.
pub fn print_dry_run(
    settings: &Settings,
    fs: Arc<dyn FileSystem>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut globs = GlobManager::with_fs(fs, settings.globs().iter().cloned())?;
    let files: BTreeSet<PathBuf> = globs.get_files();
    let doers =
        DoerManager::new(settings.commands().iter().cloned(), settings.default_doer())?;

    writeln!(out, "watchdo dry-run")?;
    if let Some(path) = settings.config_path() {
        writeln!(out, "  config = {}", path.display())?;
    }
    writeln!(out, "  watcher_method = {}", settings.method())?;
    writeln!(out, "  interval = {:?}", settings.interval())?;
    writeln!(out, "  wait_time = {:?}", settings.wait_time())?;
    writeln!(out, "  reglob = {}", settings.reglob())?;
    writeln!(out, "  run_on_remove = {}", settings.run_on_remove())?;
    writeln!(out, "  multi = {}", settings.multi())?;
    writeln!(out)?;

    writeln!(out, "files ({}):", files.len())?;
    for file in &files {
        writeln!(out, "  - {}", file.display())?;
    }
    writeln!(out)?;

    writeln!(out, "doers ({}):", doers.doers().len())?;
    for doer in doers.doers() {
        writeln!(out, "  - {}: {}", doer.kind(), doer.command())?;
    }

    debug!("dry-run complete (no execution)");

    if files.is_empty() {
        return Err(WatchdoError::NoFiles);
    }
    Ok(())
}
