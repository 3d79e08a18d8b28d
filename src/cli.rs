// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::{DoerKind, WatchMethod};

/// Command-line arguments for `watchdo`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "watchdo",
    version,
    about = "Watch Do, a command line utility that monitors files for changes \
             and performs actions when those changes are detected.",
    long_about = None
)]
pub struct CliArgs {
    /// File glob to watch; may be given multiple times.
    ///
    /// Quote it so the shell does not expand it. `**` matches any number of
    /// directories.
    #[arg(short = 'w', long = "watch", value_name = "GLOB")]
    pub globs: Vec<String>,

    /// Action to perform, formatted as `[doer::]command`; may be given
    /// multiple times.
    ///
    /// `%f` is replaced by the changed file (`\%f` for a literal `%f`), e.g.
    /// "shell::echo '%f changed!'". Without a `doer::` prefix
    /// `--default-doer` is used; a command containing `::` MUST name its
    /// doer explicitly.
    #[arg(short = 'd', long = "do", value_name = "COMMAND")]
    pub commands: Vec<String>,

    /// The method to determine if a file has changed [default: modificationtime].
    #[arg(short = 'm', long, value_enum, value_name = "METHOD")]
    pub watcher_method: Option<WatchMethod>,

    /// The doer used for commands without a `doer::` prefix [default: shell].
    #[arg(long, value_enum, value_name = "DOER")]
    pub default_doer: Option<DoerKind>,

    /// Seconds between checks for changed files [default: 2].
    #[arg(short = 'i', long, value_name = "SECONDS")]
    pub interval: Option<f64>,

    /// Seconds to wait between detecting a change and running the doers [default: 0].
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub wait_time: Option<f64>,

    /// Disable the header and footer printed around the doers' output.
    #[arg(short = 'b', long)]
    pub disable_banners: bool,

    /// Don't clear the screen between file changes.
    #[arg(short = 'c', long)]
    pub disable_clear: bool,

    /// Re-evaluate the globs on every check to pick up new or removed files.
    #[arg(short = 'r', long)]
    pub reglob: bool,

    /// Run the doers when a file is removed. Requires `--reglob`.
    #[arg(short = 'e', long)]
    pub run_on_remove: bool,

    /// Run the doers once per changed file instead of once per group of
    /// changes detected in the same check.
    #[arg(short = 'n', long)]
    pub multi: bool,

    /// Optional TOML file with defaults for any of the options above.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Expand the globs and parse the doers, print them, but don't watch or
    /// run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHDO_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
