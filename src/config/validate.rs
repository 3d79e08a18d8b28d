// src/config/validate.rs

use std::time::Duration;

use tracing::warn;

use crate::config::model::{RawSettings, Settings, DEFAULT_INTERVAL_SECS};
use crate::errors::{Result, WatchdoError};
use crate::types::{DoerKind, WatchMethod};

impl TryFrom<RawSettings> for Settings {
    type Error = WatchdoError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        ensure_has_globs(&raw)?;
        ensure_has_commands(&raw)?;

        let method = match raw.watcher_method.as_deref() {
            Some(name) => name.parse::<WatchMethod>()?,
            None => WatchMethod::default(),
        };
        let default_doer = match raw.default_doer.as_deref() {
            Some(name) => DoerKind::from_tag(name)?,
            None => DoerKind::default(),
        };

        let interval = seconds("interval", raw.interval.unwrap_or(DEFAULT_INTERVAL_SECS))?;
        if interval.is_zero() {
            return Err(WatchdoError::ConfigError(
                "interval must be greater than 0 seconds".to_string(),
            ));
        }
        let wait_time = seconds("wait_time", raw.wait_time.unwrap_or(0.0))?;

        let reglob = raw.reglob.unwrap_or(false);
        let run_on_remove = raw.run_on_remove.unwrap_or(false);
        if run_on_remove && !reglob {
            warn!("run_on_remove has no effect without reglob; removed files are never detected");
        }

        Ok(Settings {
            globs: raw.watch,
            commands: raw.commands,
            method,
            default_doer,
            interval,
            wait_time,
            disable_banners: raw.disable_banners.unwrap_or(false),
            disable_clear: raw.disable_clear.unwrap_or(false),
            reglob,
            run_on_remove,
            multi: raw.multi.unwrap_or(false),
            config_path: None,
        })
    }
}

fn ensure_has_globs(raw: &RawSettings) -> Result<()> {
    if raw.watch.is_empty() {
        return Err(WatchdoError::ConfigError(
            "at least one glob must be given with --watch (or `watch` in the config file)"
                .to_string(),
        ));
    }
    Ok(())
}

fn ensure_has_commands(raw: &RawSettings) -> Result<()> {
    if raw.commands.is_empty() {
        return Err(WatchdoError::ConfigError(
            "at least one command must be given with --do (or `do` in the config file)"
                .to_string(),
        ));
    }
    Ok(())
}

fn seconds(field: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        WatchdoError::ConfigError(format!(
            "{field} must be a finite, non-negative number of seconds (got {value})"
        ))
    })
}
