// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** validate. Use
/// [`load_and_validate`] or [`resolve_settings`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawSettings = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a configuration file from path and validate it on its own.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let mut settings = Settings::try_from(raw)?;
    settings.config_path = Some(path.to_path_buf());
    Ok(settings)
}

/// Overlay the flags given on the command line onto file settings.
///
/// Lists given on the CLI replace the file's lists; switches only ever turn
/// an option on, since an absent flag is indistinguishable from `false`.
pub fn merge_cli_args(mut raw: RawSettings, args: &CliArgs) -> RawSettings {
    if !args.globs.is_empty() {
        raw.watch = args.globs.clone();
    }
    if !args.commands.is_empty() {
        raw.commands = args.commands.clone();
    }
    if let Some(method) = args.watcher_method {
        raw.watcher_method = Some(method.identifier().to_string());
    }
    if let Some(doer) = args.default_doer {
        raw.default_doer = Some(doer.identifier().to_string());
    }
    if args.interval.is_some() {
        raw.interval = args.interval;
    }
    if args.wait_time.is_some() {
        raw.wait_time = args.wait_time;
    }

    let switches = [
        (args.disable_banners, &mut raw.disable_banners),
        (args.disable_clear, &mut raw.disable_clear),
        (args.reglob, &mut raw.reglob),
        (args.run_on_remove, &mut raw.run_on_remove),
        (args.multi, &mut raw.multi),
    ];
    for (flag, slot) in switches {
        if flag {
            *slot = Some(true);
        }
    }

    raw
}

/// Build validated settings from the CLI, reading `--config` if given.
pub fn resolve_settings(args: &CliArgs) -> Result<Settings> {
    let raw = match &args.config {
        Some(path) => {
            debug!(?path, "loading config file");
            load_from_path(path)?
        }
        None => RawSettings::default(),
    };

    let mut settings = Settings::try_from(merge_cli_args(raw, args))?;
    settings.config_path = args.config.clone();
    Ok(settings)
}
