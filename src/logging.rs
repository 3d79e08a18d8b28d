// src/logging.rs

//! Diagnostics for `watchdo`, written to stderr.
//!
//! Stdout belongs to the banners and the doers' output; everything logged
//! here goes to stderr and is quiet (`warn`) unless asked for.
//!
//! `WATCHDO_LOG` takes `tracing` filter directives, so a single layer can be
//! opened up without the rest, e.g. `WATCHDO_LOG=watchdo::watch=debug`.
//! `--log-level` overrides it with one global level.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "WATCHDO_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(cli_level, env.as_deref()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

/// The filter `init_logging` installs.
///
/// Unparseable `WATCHDO_LOG` directives fall back to the default rather than
/// failing startup.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }

    env.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
